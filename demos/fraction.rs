//! Fraction fixture - runs the classic SLIM division scenario.
//!
//! This demo shows:
//! - Connecting to a running SLIM server
//! - Building a batch with generated ids
//! - Reading `/__VOID__/` and exception answers
//!
//! # Running
//!
//! Start a SLIM server with the FitNesse test fixtures on its classpath,
//! then pass its address:
//!
//! ```text
//! cargo run --example fraction -- 127.0.0.1:8085
//! ```

use slim_client::{Answer, Client, InstructionBatch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8085".to_string());

    let mut client = Client::builder().connect(addr.as_str()).await?;

    let mut batch = InstructionBatch::new();
    batch.import("fitnesse.slim.test");
    batch.make("division", "Division", Vec::<String>::new());
    batch.call("division", "setNumerator", ["10"]);
    batch.call("division", "setDenominator", ["2"]);
    batch.call("division", "quotient", Vec::<String>::new());

    for (instruction, answer) in client.execute_batch(batch).await? {
        match answer {
            Answer::Ok(value) if value.is_void() => {
                println!("{:>5} {:<14} (void)", instruction.id(), instruction.verb())
            }
            Answer::Ok(value) => println!(
                "{:>5} {:<14} {}",
                instruction.id(),
                instruction.verb(),
                serde_json::to_string(&value)?
            ),
            Answer::Exception(message) => println!(
                "{:>5} {:<14} EXCEPTION {}",
                instruction.id(),
                instruction.verb(),
                message
            ),
        }
    }

    client.bye().await?;
    Ok(())
}
