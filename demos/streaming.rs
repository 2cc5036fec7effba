//! Chunked feeding: the reader holds partial tokens across feed calls, so
//! input can arrive in pieces of any size.
//!
//! Run with: `cargo run --example streaming`

use luxem::{Event, Reader, TreeBuilder};

fn main() -> luxem::Result<()> {
    let input = b"{key1: val1, key5: [val5.1, (type5.3) {val5.3.3: []}]}";

    // Collect raw events, three bytes at a time.
    let mut reader = Reader::new(Vec::<Event>::new());
    for chunk in input.chunks(3) {
        reader.feed(chunk, false)?;
    }
    reader.feed(b"", true)?;
    for event in reader.sink() {
        println!("{:?}", event);
    }

    // The same stream drives the tree builder.
    let mut reader = Reader::new(TreeBuilder::new());
    for chunk in input.chunks(3) {
        reader.feed(chunk, false)?;
    }
    reader.feed(b"", true)?;
    let doc = reader.into_sink().finish()?;
    println!("tree: {}", doc[0]);

    Ok(())
}
