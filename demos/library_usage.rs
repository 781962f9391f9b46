//! Example: Using linepack as a library
//!
//! This example demonstrates how to use linepack in your own projects.
//!
//! Run with: cargo run --example library_usage

use linepack::inference::infer_names;
use linepack::parsing::{SystemEvents, split_lines};
use linepack::prelude::*;

const EXPORT: &str = "\
[LINE] 讀書會的聊天記錄
儲存日期：2024/05/02 09:00

2024/05/01（三）
10:00 Alice Chen\t早安
10:01 Bob\t早
10:02 Alice Chen\t今天幾點集合？
10:03 Bob\t貼圖
10:05 Alice Chen  十點半
記得帶書
10:06 Bob  好
10:07 Carol已加入群組。
10:08 Bob邀請Dave加入群組。
10:09 Alice Chen\t歡迎
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== linepack Library Usage Examples ===\n");

    // Example 1: Parse an export from a string
    println!("1. Parsing an export:");
    let parser = LineChatParser::new();
    let parsed = parser.parse_str(EXPORT);

    for msg in &parsed.messages {
        let sender = if msg.is_system() { "[system]" } else { msg.name() };
        println!(
            "   {} {}: {}",
            msg.time(),
            sender,
            msg.content().replace('\n', " | ")
        );
    }

    // Example 2: What name inference learned
    println!("\n2. Inferred names:");
    for name in &parsed.inference.promoted {
        println!("   + {}", name);
    }
    println!("   ({} candidates scored)", parsed.inference.candidates);

    // Example 3: Running pass 1 by hand with a seed
    println!("\n3. Inference with a seed registry:");
    let mut registry = NameRegistry::from_names(["Bob"]);
    let report = infer_names(
        split_lines(EXPORT),
        &mut registry,
        &InferenceConfig::new().with_min_diversity(2),
        &SystemEvents::default(),
    );
    println!("   Newly promoted: {:?}", report.promoted);
    println!("   Registry: {:?}", registry.iter().collect::<Vec<_>>());

    // Example 4: Viewer filters
    println!("\n4. Dropping placeholders and system notices:");
    let filter = FilterConfig::viewer_defaults().with_skip_system(true);
    let kept = apply_filters(parsed.messages.clone(), &filter);
    println!(
        "   Kept {} of {} messages",
        kept.len(),
        parsed.messages.len()
    );

    // Example 5: Newest first
    println!("\n5. Latest two messages:");
    for msg in latest_first(kept.clone(), Some(2)) {
        println!("   {}: {}", msg.name(), msg.content());
    }

    // Example 6: Output configuration
    println!("\n6. JSON output with timestamps:");
    let config = OutputConfig::new().with_timestamps().with_kind();
    let json = to_json(&kept[..1], &config)?;
    for line in json.lines() {
        println!("   {}", line);
    }

    // Example 7: Processing statistics
    println!("\n7. Processing statistics:");
    let stats = ProcessingStats::new(parsed.messages.len(), kept.len());
    println!("   Parsed: {} messages", stats.parsed);
    println!("   Kept: {} messages", stats.kept);
    println!("   Dropped: {:.1}%", stats.dropped_ratio());

    println!("\n=== All examples completed! ===");
    Ok(())
}
