//! Conversions between domain entities and wire DTOs.
//!
//! Both sides live in other crates, so these are plain functions rather
//! than `From` impls.

use blog_core::domain::{
    Comment, CommentChanges, NewComment, NewPost, NewUser, Page, PageRequest, PostChanges,
    PostDetails, PostFilter, Tag, TagChanges, User, UserChanges,
};
use blog_shared::Nullable;
use blog_shared::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, CreateUserRequest, PageResponse,
    PostListQuery, PostResponse, TagResponse, UpdateCommentRequest, UpdatePostRequest,
    UpdateTagRequest, UpdateUserRequest, UserResponse,
};

use crate::middleware::error::AppError;

// Users

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        birthday: user.birthday,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn new_user(req: CreateUserRequest) -> NewUser {
    NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        birthday: req.birthday,
        password: req.password,
    }
}

/// Explicit `null` on a required field never gets here: validation rejects it.
pub fn user_changes(req: UpdateUserRequest) -> UserChanges {
    UserChanges {
        first_name: req.first_name.into_patch().flatten(),
        last_name: req.last_name.into_patch().flatten(),
        email: req.email.into_patch().flatten(),
        birthday: req.birthday.into_patch(),
    }
}

// Posts

pub fn post_response(details: PostDetails) -> PostResponse {
    let PostDetails {
        post,
        tags,
        comments,
    } = details;

    PostResponse {
        id: post.id,
        author_id: post.author_id,
        slug: post.slug,
        title: post.title,
        content: post.content,
        published: post.published,
        tags: tags.into_iter().map(tag_response).collect(),
        comments: comments.into_iter().map(comment_response).collect(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// `ValidatedJson` already rejects a missing author; a request mapped without
/// it gets the same 422 here instead of a post with no owner.
pub fn new_post(req: CreatePostRequest) -> Result<NewPost, AppError> {
    let author_id = req
        .author_id
        .ok_or_else(|| AppError::Validation(vec!["author_id: is required".to_string()]))?;

    Ok(NewPost {
        author_id,
        slug: req.slug,
        title: req.title,
        content: req.content,
        published: req.published,
        tag_ids: req.tag_ids,
    })
}

pub fn post_changes(req: UpdatePostRequest) -> PostChanges {
    let tag_ids = match req.tag_ids {
        Nullable::Absent => None,
        Nullable::Null => Some(Vec::new()),
        Nullable::Value(ids) => Some(ids),
    };

    PostChanges {
        title: req.title,
        content: req.content,
        slug: req.slug,
        published: req.published,
        tag_ids,
    }
}

pub fn post_filter(query: &PostListQuery) -> (PostFilter, PageRequest) {
    let filter = PostFilter {
        author_id: query.author_id,
        created_after: query.created_at_gt,
        created_before: query.created_at_lt,
        tag_id: query.tag_id,
        title_contains: query.title_cont.clone(),
    };

    (filter, PageRequest::new(query.page, query.size))
}

pub fn page_response<T, U, F>(page: Page<T>, f: F) -> PageResponse<U>
where
    F: FnMut(T) -> U,
{
    let page = page.map(f);

    PageResponse {
        content: page.content,
        page: page.page,
        size: page.size,
        total_elements: page.total_elements,
        total_pages: page.total_pages,
    }
}

// Comments

pub fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        body: comment.body,
        post_id: comment.post_id,
        created_at: comment.created_at,
    }
}

pub fn new_comment(req: CreateCommentRequest) -> NewComment {
    NewComment {
        body: req.body,
        post_id: req.post_id,
    }
}

pub fn comment_changes(req: UpdateCommentRequest) -> CommentChanges {
    CommentChanges {
        body: req.body,
        post_id: req.post_id,
    }
}

// Tags

pub fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}

pub fn tag_changes(req: UpdateTagRequest) -> TagChanges {
    TagChanges {
        name: req.name.into_patch().flatten(),
    }
}
