//! Dynamic filter for listing posts.
//!
//! Each optional filter becomes one predicate; an absent filter contributes
//! nothing, and the present ones are combined with AND.

use chrono::{NaiveDate, NaiveTime};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use blog_core::domain::PostFilter;

use super::entity::{post, post_tag};

/// Builds a [`Condition`] over the `posts` table from a [`PostFilter`].
pub struct PostSpecification;

impl PostSpecification {
    pub fn build(filter: &PostFilter) -> Condition {
        Condition::all()
            .add_option(with_author_id(filter.author_id))
            .add_option(with_created_after(filter.created_after))
            .add_option(with_created_before(filter.created_before))
            .add_option(with_tag_id(filter.tag_id))
            .add_option(with_title_containing(filter.title_contains.as_deref()))
    }
}

fn with_author_id(author_id: Option<Uuid>) -> Option<SimpleExpr> {
    author_id.map(|id| post::Column::AuthorId.eq(id))
}

fn with_created_after(date: Option<NaiveDate>) -> Option<SimpleExpr> {
    date.map(|date| post::Column::CreatedAt.gt(start_of_day(date)))
}

fn with_created_before(date: Option<NaiveDate>) -> Option<SimpleExpr> {
    date.map(|date| post::Column::CreatedAt.lt(start_of_day(date)))
}

fn with_tag_id(tag_id: Option<Uuid>) -> Option<SimpleExpr> {
    tag_id.map(|id| {
        post::Column::Id.in_subquery(
            Query::select()
                .column(post_tag::Column::PostId)
                .from(post_tag::Entity)
                .and_where(post_tag::Column::TagId.eq(id))
                .to_owned(),
        )
    })
}

/// Case-insensitive substring match; `%` and `_` in the input are literal.
fn with_title_containing(text: Option<&str>) -> Option<SimpleExpr> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    let escaped = text
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Some(
        Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Title))))
            .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\')),
    )
}

fn start_of_day(date: NaiveDate) -> DateTimeWithTimeZone {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql_for(filter: &PostFilter) -> String {
        post::Entity::find()
            .filter(PostSpecification::build(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_filter_is_always_true() {
        let sql = sql_for(&PostFilter::default());
        assert!(sql.ends_with(r#"FROM "posts" WHERE TRUE"#), "{sql}");
    }

    #[test]
    fn test_author_filter() {
        let author_id = Uuid::new_v4();
        let sql = sql_for(&PostFilter {
            author_id: Some(author_id),
            ..Default::default()
        });

        assert!(sql.contains(r#""posts"."author_id" ="#), "{sql}");
        assert!(sql.contains(&author_id.to_string()), "{sql}");
    }

    #[test]
    fn test_filters_are_combined_with_and() {
        let sql = sql_for(&PostFilter {
            author_id: Some(Uuid::new_v4()),
            created_after: NaiveDate::from_ymd_opt(2024, 3, 1),
            tag_id: Some(Uuid::new_v4()),
            ..Default::default()
        });

        assert_eq!(sql.matches(" AND ").count(), 2, "{sql}");
        assert!(sql.contains(r#""posts"."created_at" >"#), "{sql}");
        assert!(sql.contains("2024-03-01"), "{sql}");
        assert!(sql.contains(r#"IN (SELECT "post_id" FROM "post_tags""#), "{sql}");
    }

    #[test]
    fn test_title_filter_is_case_insensitive_and_escaped() {
        let sql = sql_for(&PostFilter {
            title_contains: Some("  100% Rust ".to_string()),
            ..Default::default()
        });

        assert!(sql.contains("LOWER"), "{sql}");
        assert!(sql.contains(r"E'%100\\% rust%'"), "{sql}");
        assert!(sql.contains(r"ESCAPE E'\\'"), "{sql}");
    }

    #[test]
    fn test_blank_title_filter_is_ignored() {
        let sql = sql_for(&PostFilter {
            title_contains: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(sql.ends_with(r#"FROM "posts" WHERE TRUE"#), "{sql}");
    }
}
