use rusqlite::Connection;

use crate::db;
use crate::error::StoreError;
use crate::fixtures;
use crate::models::BlogPost;

pub const DEFAULT_SEED_COUNT: usize = 10;

/// Generates `count` posts and bulk-inserts them, returning what was stored.
pub fn seed_with(conn: &mut Connection, count: usize) -> Result<Vec<BlogPost>, StoreError> {
    tracing::info!(count, "seeding blog data");
    let posts: Vec<BlogPost> = (0..count).map(|_| fixtures::generate_post()).collect();
    db::insert_posts(conn, &posts)?;
    Ok(posts)
}

pub fn seed(conn: &mut Connection) -> Result<Vec<BlogPost>, StoreError> {
    seed_with(conn, DEFAULT_SEED_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IN_MEMORY;

    #[test]
    fn test_seed_inserts_ten() {
        let mut conn = db::open(IN_MEMORY).unwrap();
        let posts = seed(&mut conn).unwrap();
        assert_eq!(posts.len(), 10);
        assert_eq!(db::count_posts(&conn).unwrap(), 10);
        for post in &posts {
            assert_eq!(db::get_post(&conn, &post.id).unwrap().as_ref(), Some(post));
        }
    }

    #[test]
    fn test_seed_accumulates() {
        let mut conn = db::open(IN_MEMORY).unwrap();
        seed_with(&mut conn, 3).unwrap();
        seed_with(&mut conn, 4).unwrap();
        assert_eq!(db::count_posts(&conn).unwrap(), 7);
    }

    #[test]
    fn test_seed_surfaces_store_errors() {
        let mut conn = db::open(IN_MEMORY).unwrap();
        conn.execute_batch("DROP TABLE posts;").unwrap();
        assert!(matches!(seed(&mut conn), Err(StoreError::Sqlite(_))));
    }
}
