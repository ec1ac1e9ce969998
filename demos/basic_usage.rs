// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic solrify usage example.
//!
//! Demonstrates:
//! 1. Declaring a field enumeration with engine-side aliases
//! 2. Building and rendering query expressions
//! 3. Counting, paging and faceting against a running Solr core
//! 4. Displaying request metrics
//!
//! # Prerequisites
//!
//! A Solr instance with a `books` core:
//! ```bash
//! docker run -d -p 8983:8983 solr:9 solr-precreate books
//! ```
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde::Deserialize;
use solrify::query::{and, group, not, or};
use solrify::{mapping_field, tagged_value, MappingField, Query, SolrClient, SolrConfig};

mapping_field! {
    pub enum Book {
        Title = "title_t",
        Author = "author_s",
        Year = "publication_year_i",
        Status = "status_s",
        Genre = "genre_s",
    }
}

tagged_value! {
    pub enum Status {
        Published = "published",
        Draft = "draft",
    }
}

#[derive(Debug, Deserialize)]
struct BookDoc {
    id: String,
    #[serde(default)]
    title_t: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install metrics recorder (captures request counters and latencies)
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Fields
    // ─────────────────────────────────────────────────────────────────────────
    for field in Book::members() {
        println!("{:<8} attr={:<8} alias={}", field, field.attr_name(), field.alias());
    }
    println!("lookup 'genre_s' -> {:?}", Book::from_alias("genre_s")?);

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Queries
    // ─────────────────────────────────────────────────────────────────────────
    let by_author = Query::any_of(Book::Author, ["Le Guin", "Herbert"])?;
    let recent = Query::field(Book::Year, (1960, 1980));
    let not_draft = not(&Query::field(Book::Status, Status::Draft));
    let query = and(&group(&or(&by_author, &recent)), &not_draft);
    println!("\nq = {}", query);

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Client
    // ─────────────────────────────────────────────────────────────────────────
    let config = SolrConfig {
        retries: 2,
        backoff_factor: 0.5,
        ..SolrConfig::new("http://localhost:8983", "solr/books/select")
    };
    let client: SolrClient<BookDoc> = SolrClient::new(config)?;

    if !client.is_available().await {
        println!("\nSolr is not reachable at http://localhost:8983, skipping requests");
        return Ok(());
    }

    println!("\nmatches: {}", client.num_found(&query).await?);

    let mut cursor = client.search(&query, Some(&["id", "title_t"][..]));
    while let Some(page) = cursor.next_page().await? {
        for doc in page {
            println!("  {} {}", doc.id, doc.title_t.as_deref().unwrap_or("-"));
        }
    }

    for bucket in client.facet(&Query::exists(Book::Genre), Book::Genre).await? {
        println!("  {:<20} {}", bucket.value, bucket.count);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Metrics
    // ─────────────────────────────────────────────────────────────────────────
    println!("\nmetrics:");
    for (key, _, _, value) in snapshotter.snapshot().into_vec() {
        if let DebugValue::Counter(count) = value {
            println!("  {} {:?} = {}", key.key().name(), key.key().labels().collect::<Vec<_>>(), count);
        }
    }

    Ok(())
}
