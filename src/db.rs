use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::IN_MEMORY;
use crate::error::StoreError;
use crate::models::{AuthorName, BlogPost};

const POST_COLUMNS: &str = "id, author_first_name, author_last_name, title, content, created";

pub fn initialize(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY NOT NULL,
            author_first_name TEXT NOT NULL DEFAULT '',
            author_last_name TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created);
        ",
    )?;
    Ok(())
}

/// Opens (creating if needed) the database at `path` and initializes the schema.
pub fn open(path: &str) -> Result<Connection, StoreError> {
    let conn = if path == IN_MEMORY {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Connection::open(path)?
    };
    initialize(&conn)?;
    tracing::debug!(path, "database opened");
    Ok(conn)
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        author: AuthorName { first_name: row.get(1)?, last_name: row.get(2)? },
        title: row.get(3)?,
        content: row.get(4)?,
        created: row.get(5)?,
    })
}

pub fn insert_post(conn: &Connection, post: &BlogPost) -> Result<(), StoreError> {
    conn.execute(
        &format!("INSERT INTO posts ({POST_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
            post.id,
            post.author.first_name,
            post.author.last_name,
            post.title,
            post.content,
            post.created,
        ],
    )?;
    Ok(())
}

/// Inserts all posts in one transaction; nothing is written if any row fails.
pub fn insert_posts(conn: &mut Connection, posts: &[BlogPost]) -> Result<(), StoreError> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&format!("INSERT INTO posts ({POST_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"))?;
        for post in posts {
            stmt.execute(params![
                post.id,
                post.author.first_name,
                post.author.last_name,
                post.title,
                post.content,
                post.created,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Newest first.
pub fn list_posts(conn: &Connection) -> Result<Vec<BlogPost>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created DESC, rowid DESC"))?;
    let posts = stmt
        .query_map([], post_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(posts)
}

pub fn get_post(conn: &Connection, id: &str) -> Result<Option<BlogPost>, StoreError> {
    let post = conn
        .query_row(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"), [id], post_from_row)
        .optional()?;
    Ok(post)
}

pub fn count_posts(conn: &Connection) -> Result<usize, StoreError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))?;
    usize::try_from(count).map_err(|_| StoreError::Sqlite(rusqlite::Error::IntegralValueOutOfRange(0, count)))
}

/// Applies the given title/content. Returns false when no post has `id`.
pub fn update_post(
    conn: &Connection,
    id: &str,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<bool, StoreError> {
    let changed = conn.execute(
        "UPDATE posts SET title = COALESCE(?1, title), content = COALESCE(?2, content) WHERE id = ?3",
        params![title, content, id],
    )?;
    Ok(changed > 0)
}

/// Returns true when a row was removed.
pub fn delete_post(conn: &Connection, id: &str) -> Result<bool, StoreError> {
    let removed = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
    Ok(removed > 0)
}

/// Drops every table and recreates an empty schema.
pub fn drop_database(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("DROP TABLE IF EXISTS posts;")?;
    initialize(conn)?;
    tracing::warn!("database dropped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_post(id: &str, title: &str, minutes_ago: i64) -> BlogPost {
        BlogPost {
            id: id.to_string(),
            author: AuthorName::new("Grace", "Hopper"),
            title: title.to_string(),
            content: format!("{} body", title),
            created: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn memory_db() -> Connection {
        open(IN_MEMORY).unwrap()
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let conn = memory_db();
        let post = make_post("p1", "First", 5);
        insert_post(&conn, &post).unwrap();
        assert_eq!(get_post(&conn, "p1").unwrap(), Some(post));
        assert_eq!(get_post(&conn, "missing").unwrap(), None);
    }

    #[test]
    fn test_list_newest_first() {
        let mut conn = memory_db();
        insert_posts(&mut conn, &[make_post("old", "Old", 60), make_post("new", "New", 1)]).unwrap();
        let ids: Vec<_> = list_posts(&conn).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(count_posts(&conn).unwrap(), 2);
    }

    #[test]
    fn test_bulk_insert_is_atomic() {
        let mut conn = memory_db();
        let dup = make_post("same", "A", 1);
        let result = insert_posts(&mut conn, &[dup.clone(), make_post("other", "B", 2), dup]);
        assert!(result.is_err());
        assert_eq!(count_posts(&conn).unwrap(), 0);
    }

    #[test]
    fn test_update_touches_only_given_fields() {
        let conn = memory_db();
        let post = make_post("p1", "Before", 5);
        insert_post(&conn, &post).unwrap();

        assert!(update_post(&conn, "p1", Some("After"), None).unwrap());
        let stored = get_post(&conn, "p1").unwrap().unwrap();
        assert_eq!(stored.title, "After");
        assert_eq!(stored.content, post.content);
        assert_eq!(stored.author, post.author);
        assert_eq!(stored.created, post.created);

        assert!(!update_post(&conn, "nope", Some("X"), Some("Y")).unwrap());
    }

    #[test]
    fn test_delete() {
        let conn = memory_db();
        insert_post(&conn, &make_post("p1", "Gone", 1)).unwrap();
        assert!(delete_post(&conn, "p1").unwrap());
        assert!(!delete_post(&conn, "p1").unwrap());
        assert_eq!(get_post(&conn, "p1").unwrap(), None);
    }

    #[test]
    fn test_drop_database_leaves_usable_schema() {
        let conn = memory_db();
        insert_post(&conn, &make_post("p1", "One", 1)).unwrap();
        drop_database(&conn).unwrap();
        assert_eq!(count_posts(&conn).unwrap(), 0);
        insert_post(&conn, &make_post("p2", "Two", 1)).unwrap();
        assert_eq!(count_posts(&conn).unwrap(), 1);
    }

    #[test]
    fn test_count_empty_and_after_inserts() {
        let mut conn = memory_db();
        assert_eq!(count_posts(&conn).unwrap(), 0);
        insert_posts(&mut conn, &[make_post("a", "A", 1), make_post("b", "B", 2), make_post("c", "C", 3)]).unwrap();
        assert_eq!(count_posts(&conn).unwrap(), 3);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/blog.db");
        let conn = open(path.to_str().unwrap()).unwrap();
        assert_eq!(count_posts(&conn).unwrap(), 0);
        assert!(path.exists());
    }
}
