use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

impl AuthorName {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self { first_name: first_name.to_string(), last_name: last_name.to_string() }
    }

    /// "First Last", trimmed when either half is empty.
    pub fn display(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A stored blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: String,
    pub author: AuthorName,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    pub fn to_response(&self) -> PostResponse {
        PostResponse {
            id: self.id.clone(),
            author: self.author.display(),
            title: self.title.clone(),
            content: self.content.clone(),
            created: self.created,
        }
    }

    /// Request body that would create this post over HTTP.
    pub fn to_create_req(&self) -> CreatePostReq {
        CreatePostReq {
            author: Some(AuthorReq {
                first_name: Some(self.author.first_name.clone()),
                last_name: Some(self.author.last_name.clone()),
            }),
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            created: Some(self.created),
        }
    }
}

// ─── Wire representations ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorReq>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_display() {
        assert_eq!(AuthorName::new("Ada", "Lovelace").display(), "Ada Lovelace");
        assert_eq!(AuthorName::new("Ada", "").display(), "Ada");
    }

    #[test]
    fn test_response_fields() {
        let post = BlogPost {
            id: "abc".to_string(),
            author: AuthorName::new("A", "B"),
            title: "T".to_string(),
            content: "C".to_string(),
            created: Utc::now(),
        };
        let value = serde_json::to_value(post.to_response()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["author", "content", "created", "id", "title"]);
        assert_eq!(value["author"], "A B");
    }

    #[test]
    fn test_create_req_uses_camel_case_author() {
        let req: CreatePostReq = serde_json::from_str(
            r#"{"author": {"firstName": "A", "lastName": "B"}, "title": "T", "content": "C"}"#,
        )
        .unwrap();
        let author = req.author.unwrap();
        assert_eq!(author.first_name.as_deref(), Some("A"));
        assert_eq!(author.last_name.as_deref(), Some("B"));
        assert!(req.created.is_none());
    }
}
