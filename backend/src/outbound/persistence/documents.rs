//! BSON document shapes for the `users` and `posts` collections.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, NewPost, NewUser, PasswordHash, Post, User};

pub(super) fn object_id(id: &EntityId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub(super) fn entity_id(oid: ObjectId) -> EntityId {
    EntityId::from_bytes(oid.bytes())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "fcmToken", default)]
    pub fcm_token: String,
    // Older documents store a null friend list.
    #[serde(default)]
    pub friends: Option<Vec<ObjectId>>,
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password: user.password.into(),
            fcm_token: user.fcm_token,
            friends: Some(user.friends.iter().map(object_id).collect()),
        }
    }
}

impl UserDocument {
    /// Map onto the domain user, failing when `_id` is absent.
    pub fn into_domain(self) -> Result<User, String> {
        let id = self.id.ok_or_else(|| "user document has no _id".to_owned())?;
        let mut friends = Vec::new();
        for friend in self.friends.unwrap_or_default() {
            let friend = entity_id(friend);
            if !friends.contains(&friend) {
                friends.push(friend);
            }
        }
        Ok(User {
            id: entity_id(id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: PasswordHash::new(self.password),
            fcm_token: self.fcm_token,
            friends,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub content: String,
    pub author: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<NewPost> for PostDocument {
    fn from(post: NewPost) -> Self {
        Self {
            id: None,
            content: post.content,
            author: object_id(&post.author),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl PostDocument {
    /// Map onto the domain post, failing when `_id` is absent.
    pub fn into_domain(self) -> Result<Post, String> {
        let id = self.id.ok_or_else(|| "post document has no _id".to_owned())?;
        Ok(Post {
            id: entity_id(id),
            content: self.content,
            author: entity_id(self.author),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
