//! Post queries.

use crate::pool::{SourcePool, SourceResult};
use polysync_core::Post;

/// List all posts with their author ids, ordered by id.
pub fn list_posts(pool: &SourcePool) -> SourceResult<Vec<Post>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, content, author_id FROM posts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Post {
                id: row.get(0)?,
                content: row.get(1)?,
                author_id: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    })
}

/// Count of posts, for the status display.
pub fn count_posts(pool: &SourcePool) -> SourceResult<i64> {
    pool.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    #[test]
    fn test_list_posts_carries_author() {
        let pool = SourcePool::in_memory().unwrap();
        migrations::run_migrations(&pool).unwrap();
        migrations::seed_demo_data(&pool).unwrap();

        let posts = list_posts(&pool).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 10);
        assert_eq!(posts[0].author_id, 1);
    }
}
