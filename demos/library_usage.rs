//! Example: Using chatlinks as a library
//!
//! This example demonstrates how to use chatlinks in your own projects.
//! It stays offline: previews come from a small local strategy instead of
//! the network.
//!
//! Run with: cargo run --example library_usage

use std::sync::Arc;

use async_trait::async_trait;
use chatlinks::error::ResolveError;
use chatlinks::metadata::{avatar_color, short_date};
use chatlinks::prelude::*;

const CHAT: &str = "\
[3/1/24, 10:00:15 AM] Alice: read this https://www.rust-lang.org/learn
and this line continues the message above
[3/1/24, 10:05:00 AM] Bob: https://youtu.be/dQw4w9WgXcQ lol
15/03/2024, 09:30 - Charlie: two at once https://x.com/rustlang/status/1 https://docs.rs
Messages and calls are end-to-end encrypted.
[3/2/24, 8:00:00 PM] Alice: no link here";

/// Answers every URL with its own domain as the title.
struct DomainTitles;

#[async_trait]
impl PreviewStrategy for DomainTitles {
    fn name(&self) -> &'static str {
        "domain-titles"
    }

    fn claim(&self, url: &str) -> Option<String> {
        Some(chatlinks::metadata::domain_of(url))
    }

    async fn fetch(&self, _url: &str, key: &str) -> std::result::Result<Preview, ResolveError> {
        Ok(Preview::titled(key).with_description(format!("A page on {key}")))
    }

    fn fallback(&self, url: &str, _key: &str, _err: &ResolveError) -> Preview {
        Preview::titled(url).failed()
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatlinks Library Usage Examples ===\n");

    // Example 1: Parse a log
    println!("1. Extracting links:");
    let result = parse(CHAT);
    for link in &result.links {
        println!(
            "   [{}] {} ({}): {}",
            short_date(&link.date),
            link.author,
            avatar_color(&link.author),
            link.url
        );
    }
    println!("   Authors: {}", result.authors.join(", "));

    // Example 2: Filter
    println!("\n2. Links from Alice or on docs.rs:");
    let from_alice = apply_filters(result.links.clone(), &LinkFilter::new().with_author("alice"));
    let on_docs = apply_filters(result.links.clone(), &LinkFilter::new().with_domain("docs.rs"));
    println!("   Alice: {}, docs.rs: {}", from_alice.len(), on_docs.len());

    // Example 3: Statistics
    println!("\n3. Statistics:");
    let stats = LinkStats::from_links(&result.links);
    println!("   Total: {}, unique: {}", stats.total_links, stats.unique_urls);
    for (domain, count) in &stats.by_domain {
        println!("   {domain}: {count}");
    }

    // Example 4: Resolve previews one link at a time
    println!("\n4. One-shot preview cells:");
    let resolver = Arc::new(MetadataResolver::with_strategies(
        ResolverConfig::default(),
        vec![Box::new(DomainTitles)],
    ));
    let cell = Arc::new(PreviewCell::new(result.links[0].clone()));
    println!("   Loading: {}", cell.snapshot().is_loading);
    cell.trigger(&resolver);
    // A second trigger is ignored
    println!("   Second trigger started: {}", cell.trigger(&resolver));
    let meta = cell.settled().await;
    println!("   Settled: {:?} ({:?})", meta.title, meta.kind());

    // Example 5: Write every link with its preview
    println!("\n5. JSON with previews:");
    let previews = resolver.resolve_all(&result.links, 4).await;
    let records: Vec<LinkRecord> = result
        .links
        .into_iter()
        .map(|link| {
            let preview = previews
                .iter()
                .find(|(id, _)| *id == link.id)
                .map(|(_, meta)| meta.clone());
            LinkRecord { link, preview }
        })
        .collect();
    let json = to_format_string(&records, OutputFormat::Jsonl, &OutputConfig::new().with_previews())?;
    println!("{json}");

    println!("=== Examples complete! ===");
    Ok(())
}
