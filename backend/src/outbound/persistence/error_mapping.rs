//! Shared classification of MongoDB driver failures.

use mongodb::error::{Error as MongoError, ErrorKind};

use crate::domain::ports::{PostRepositoryError, UserRepositoryError};

/// True when the failure means the server could not be reached rather than
/// that the operation itself was rejected.
fn is_connectivity(error: &MongoError) -> bool {
    matches!(
        *error.kind,
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. }
    )
}

pub(super) fn map_user_error(error: MongoError) -> UserRepositoryError {
    if is_connectivity(&error) {
        UserRepositoryError::connection(error.to_string())
    } else if matches!(*error.kind, ErrorKind::BsonDeserialization(_)) {
        UserRepositoryError::decode(error.to_string())
    } else {
        UserRepositoryError::query(error.to_string())
    }
}

pub(super) fn map_post_error(error: MongoError) -> PostRepositoryError {
    if is_connectivity(&error) {
        PostRepositoryError::connection(error.to_string())
    } else if matches!(*error.kind, ErrorKind::BsonDeserialization(_)) {
        PostRepositoryError::decode(error.to_string())
    } else {
        PostRepositoryError::query(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_failures_are_connection_errors() {
        let error = MongoError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(matches!(
            map_user_error(error.clone()),
            UserRepositoryError::Connection { .. }
        ));
        assert!(matches!(
            map_post_error(error),
            PostRepositoryError::Connection { .. }
        ));
    }

    #[test]
    fn decode_failures_are_reported_as_decode() {
        let bson_error = bson::from_document::<String>(bson::doc! {}).expect_err("not a string");
        let error = MongoError::from(ErrorKind::BsonDeserialization(bson_error));
        assert!(matches!(
            map_user_error(error),
            UserRepositoryError::Decode { .. }
        ));
    }

    #[test]
    fn other_failures_are_query_errors() {
        let error = MongoError::from(ErrorKind::InvalidArgument {
            message: "bad filter".to_owned(),
        });
        assert!(matches!(
            map_post_error(error),
            PostRepositoryError::Query { .. }
        ));
    }
}
