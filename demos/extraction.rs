//! Structural extraction: describe the document shape and receive
//! converted values through callbacks, without building a tree first.
//!
//! Run with: `cargo run --example extraction`

use luxem::{extract, ArrayShape, Extract, ObjectShape};

fn main() -> luxem::Result<()> {
    let source = b"{
        config: {
            path: /usr/bin,
            iterations: (int) 10,
            verbose: yes,
        },
        inputs: [batch001, batch002, (optional) batch003],
    }";

    let mut path = String::new();
    let mut iterations = 0;
    let mut verbose = false;
    let mut batches = Vec::new();

    extract(
        &source[..],
        Extract::object(
            ObjectShape::new()
                .field("config", Extract::object(
                    ObjectShape::new()
                        .field("path", Extract::string(|s| {
                            path = s;
                            Ok(())
                        }))
                        .field("iterations", Extract::int(|n| {
                            iterations = n;
                            Ok(())
                        }))
                        .field("verbose", Extract::bool(|b| {
                            verbose = b;
                            Ok(())
                        })),
                ))
                .field("inputs", Extract::array(ArrayShape::new().element(
                    Extract::passthrough(|annotation, text| {
                        let optional = annotation == Some("optional");
                        batches.push((text.to_string(), optional));
                        Ok(())
                    }),
                ))),
        ),
    )?;

    println!("path: {}", path);
    println!("iterations: {}", iterations);
    println!("verbose: {}", verbose);
    for (batch, optional) in &batches {
        println!("batch: {} (optional: {})", batch, optional);
    }

    Ok(())
}
