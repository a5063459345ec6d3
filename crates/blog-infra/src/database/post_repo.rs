//! SeaORM implementation of the post repository.
//!
//! Posts own two child collections (tag links and comments). Reads load both
//! in batch, and writes that touch the tag links run inside one transaction so
//! a failed link never leaves a half-written post behind.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Page, PageRequest, Post, PostDetails, PostFilter};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::base::{SqlBaseRepository, map_db_err};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::specification::PostSpecification;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_details(&self, id: Uuid) -> Result<Option<PostDetails>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let Some(model) = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let details = load_details(&txn, vec![model]).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(details.into_iter().next())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostDetails>, RepoError> {
        tracing::debug!(?filter, page = page.page, size = page.size, "Listing posts");

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let paginator = PostEntity::find()
            .filter(PostSpecification::build(filter))
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .paginate(&txn, page.size);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator.fetch_page(page.page).await.map_err(map_db_err)?;
        let content = load_details(&txn, models).await?;

        txn.commit().await.map_err(map_db_err)?;

        Ok(Page::new(content, page, total))
    }

    async fn insert_with_tags(&self, post: Post, tag_ids: &[Uuid]) -> Result<PostDetails, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel::from(post)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        link_tags(&txn, model.id, tag_ids).await?;

        let details = load_one(&txn, model).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(details)
    }

    async fn update_with_tags(
        &self,
        post: Post,
        tag_ids: Option<&[Uuid]>,
    ) -> Result<PostDetails, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel::from(post)
            .update(&txn)
            .await
            .map_err(map_db_err)?;

        if let Some(tag_ids) = tag_ids {
            PostTagEntity::delete_many()
                .filter(post_tag::Column::PostId.eq(model.id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
            link_tags(&txn, model.id, tag_ids).await?;
        }

        let details = load_one(&txn, model).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(details)
    }
}

async fn link_tags<C>(conn: &C, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    if tag_ids.is_empty() {
        return Ok(());
    }

    let links = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
        post_id: sea_orm::Set(post_id),
        tag_id: sea_orm::Set(*tag_id),
    });

    PostTagEntity::insert_many(links)
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

async fn load_one<C>(conn: &C, model: post::Model) -> Result<PostDetails, RepoError>
where
    C: ConnectionTrait,
{
    load_details(conn, vec![model])
        .await?
        .into_iter()
        .next()
        .ok_or(RepoError::NotFound)
}

/// Attach tags and comments to each post, keeping the input order.
///
/// Three queries regardless of the number of posts.
async fn load_details<C>(conn: &C, models: Vec<post::Model>) -> Result<Vec<PostDetails>, RepoError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

    let links = PostTagEntity::find()
        .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    let tags: HashMap<Uuid, tag::Model> = if links.is_empty() {
        HashMap::new()
    } else {
        TagEntity::find()
            .filter(tag::Column::Id.is_in(links.iter().map(|l| l.tag_id)))
            .all(conn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|t| (t.id, t))
            .collect()
    };

    let mut tags_by_post: HashMap<Uuid, Vec<tag::Model>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags.get(&link.tag_id) {
            tags_by_post.entry(link.post_id).or_default().push(tag.clone());
        }
    }

    let mut comments_by_post: HashMap<Uuid, Vec<comment::Model>> = HashMap::new();
    let comments = CommentEntity::find()
        .filter(comment::Column::PostId.is_in(post_ids))
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    for comment in comments {
        comments_by_post.entry(comment.post_id).or_default().push(comment);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mut tags = tags_by_post.remove(&model.id).unwrap_or_default();
            tags.sort_by(|a, b| a.name.cmp(&b.name));

            PostDetails {
                tags: tags.into_iter().map(Into::into).collect(),
                comments: comments_by_post
                    .remove(&model.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                post: model.into(),
            }
        })
        .collect())
}
