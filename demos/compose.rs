//! Split a long text into a thread and print the draft with warnings
//!
//! Run: cargo run --example compose

use threadweave::{SplitMode, ThreadSplitter, TWEET_LIMIT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    threadweave::init()?;

    let text = "Rust's ownership model eliminates whole classes of bugs at \
        compile time. No dangling pointers, no data races, no double frees. \
        The borrow checker takes getting used to, but once it clicks you \
        stop fighting it and start leaning on it. "
        .repeat(3);

    let splitter = ThreadSplitter::new();
    let draft = splitter.split(&text, SplitMode::Compose).await?;

    let summary = draft.summary();
    println!("{} segments:", summary.segment_count);
    for segment in &draft.segments {
        println!("\n{:02}. ({}/{TWEET_LIMIT})", segment.index, segment.len());
        println!("{}", segment.text);
    }
    if !summary.all_within_limit() {
        println!("\nOver limit: {:?}", summary.over_limit);
    }

    Ok(())
}
