//! # chatlinks CLI
//!
//! Command-line interface for the chatlinks library.

use std::collections::HashMap;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::info;

use chatlinks::ChatlinksError;
use chatlinks::async_parser::AsyncLogParser;
use chatlinks::cli::Args;
use chatlinks::core::{LinkRecord, LinkStats, apply_filters};
use chatlinks::format::{OutputFormat, write_to_format};
use chatlinks::resolver::MetadataResolver;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ChatlinksError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level().as_str()),
    )
    .init();

    let output_path = args.output_path();
    let filter = args.link_filter()?;

    // Print header
    println!("🔗 chatlinks v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    if let Some(ref domain) = args.domain {
        println!("🌐 Domain:  {}", domain);
    }
    if let Some(ref query) = args.query {
        println!("🔎 Query:   {}", query);
    }
    println!();

    // Step 1: Parse
    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let result = AsyncLogParser::new().parse(&args.input).await?;
    let found = result.total_links;
    println!(
        "   Found {} links from {} authors ({:.2}s)",
        found,
        result.authors.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Filter
    let links = if filter.is_active() {
        println!("🔍 Filtering links...");
        let filtered = apply_filters(result.links, &filter);
        println!("   {} links after filtering", filtered.len());
        filtered
    } else {
        result.links
    };

    // Step 3: Resolve previews
    let mut failed_previews = 0;
    let records: Vec<LinkRecord> = if args.resolve {
        let config = args.resolver_config();
        println!(
            "🌍 Resolving previews ({} at a time, {}ms timeout)...",
            args.concurrency.max(1),
            args.timeout_ms
        );
        let resolve_start = Instant::now();
        let resolver = MetadataResolver::new(config)?;
        let mut previews: HashMap<_, _> = resolver
            .resolve_all(&links, args.concurrency)
            .await
            .into_iter()
            .collect();
        info!("resolved {} previews", previews.len());

        let records: Vec<LinkRecord> = links
            .into_iter()
            .map(|link| match previews.remove(&link.id) {
                Some(meta) => LinkRecord::with_preview(link, meta),
                None => LinkRecord::bare(link),
            })
            .collect();
        failed_previews = records
            .iter()
            .filter(|r| r.preview.as_ref().is_some_and(|m| m.error))
            .count();
        println!(
            "   {} previews, {} placeholders ({:.2}s)",
            records.len(),
            failed_previews,
            resolve_start.elapsed().as_secs_f64()
        );
        records
    } else {
        links.into_iter().map(LinkRecord::bare).collect()
    };

    // Step 4: Write output in selected format
    let lib_format: OutputFormat = args.format.into();
    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&records, &output_path, lib_format, &args.output_config())?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Summary
    let kept: Vec<_> = records.iter().map(|r| r.link.clone()).collect();
    let stats = LinkStats::from_links(&kept);

    println!();
    println!("📊 Summary:");
    println!("   Found:     {} links", found);
    if filter.is_active() {
        println!("   Filtered:  {} links", stats.total_links);
    }
    println!("   Unique:    {} URLs", stats.unique_urls);
    if args.resolve {
        println!("   Failed:    {} previews", failed_previews);
    }

    if !stats.by_author.is_empty() {
        println!();
        println!("👥 Top authors:");
        for (author, count) in stats.by_author.iter().take(5) {
            println!("   {:<20} {}", author, count);
        }
    }
    if !stats.by_domain.is_empty() {
        println!();
        println!("🌐 Top domains:");
        for (domain, count) in stats.by_domain.iter().take(5) {
            println!("   {:<20} {}", domain, count);
        }
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
