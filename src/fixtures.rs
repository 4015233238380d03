//! Synthetic blog posts for seeding and request bodies.

use chrono::{Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{AuthorName, BlogPost};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Brian", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace",
    "Guido", "Hedy", "John", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Sophie", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Backus", "Dijkstra", "Hamilton", "Hopper", "Kernighan", "Knuth", "Lamport", "Liskov", "Lovelace",
    "McCarthy", "Perlman", "Ritchie", "Shannon", "Thompson", "Torvalds", "Turing", "Wilson", "Wirth",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia", "deserunt",
    "mollit", "anim", "id", "est", "laborum",
];

const TITLE_WORDS: usize = 3;
const PARAGRAPH_SENTENCES: usize = 3;
const RECENT_WINDOW_SECS: i64 = 24 * 60 * 60;

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    (0..count).map(|_| pick(rng, LOREM)).collect()
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.random_range(4..=10);
    let mut text = words(rng, count).join(" ");
    if let Some(first) = text.get(0..1).map(str::to_uppercase) {
        text.replace_range(0..1, &first);
    }
    text.push('.');
    text
}

pub fn author_name<R: Rng + ?Sized>(rng: &mut R) -> AuthorName {
    AuthorName::new(pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

pub fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    words(rng, TITLE_WORDS).join(" ")
}

pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PARAGRAPH_SENTENCES).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// One post with a fresh id and a creation time within the last day.
pub fn generate_post_with<R: Rng + ?Sized>(rng: &mut R) -> BlogPost {
    let age = Duration::seconds(rng.random_range(0..RECENT_WINDOW_SECS));
    BlogPost {
        id: uuid::Uuid::new_v4().to_string(),
        author: author_name(rng),
        title: title(rng),
        content: paragraph(rng),
        created: Utc::now() - age,
    }
}

pub fn generate_post() -> BlogPost {
    generate_post_with(&mut rand::rng())
}
