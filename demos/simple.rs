//! Your first luxem experience: build a document, write it out, read it
//! back.
//!
//! Run with: `cargo run --example simple`

use luxem::{from_str, luxem, to_string, to_string_pretty};

fn main() -> luxem::Result<()> {
    let doc = vec![luxem!({
        "config": {
            "path": "/usr/bin",
            "iterations": (("int") 10)
        },
        "inputs": ["batch001", "batch002", (("optional") "batch003")]
    })];

    let compact = to_string(&doc)?;
    println!("compact: {}", compact);

    let pretty = to_string_pretty(&doc)?;
    println!("pretty:\n{}", pretty);

    let reloaded = from_str(&pretty)?;
    assert_eq!(reloaded, doc);
    println!("round trip ok");

    Ok(())
}
