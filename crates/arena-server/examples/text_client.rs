//! Minimal terminal client speaking the text protocol.
//!
//! ```text
//! cargo run -p arena-server --example text_client
//! >> J
//! << S, X, 1
//! >> M, 4
//! ```

use std::env;

use anyhow::Result;
use arena_protocol::csv_codec::{format_input, parse_input_line};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<()> {
    // Where to connect: env override or default.
    let addr = env::var("ARENA_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(&addr).await?;
    println!("Connected.");
    println!("Commands:");
    println!("  J        (join matchmaking)");
    println!("  M, <i>   (place your symbol on cell 0-8)");
    println!("Type 'quit' or 'exit' to leave.\n");

    let (read_half, mut write_half) = stream.into_split();

    // Print everything the server sends, with the board drawn out for updates.
    let printer = tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("<< {}", line);
            if let Some(board) = line.strip_prefix("U, ").and_then(|rest| rest.split(',').next()) {
                print_board(board.trim());
            }
        }
        println!("Server closed the connection.");
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            println!("Exiting client.");
            break;
        }

        // Normalize through the codec so typos are caught locally.
        let Some(text) = parse_input_line(trimmed).as_ref().and_then(format_input) else {
            eprintln!("Could not parse command. Use `J` or `M, <index>`.");
            continue;
        };

        write_half.write_all(text.as_bytes()).await?;
        write_half.write_all(b"\n").await?;
    }

    printer.abort();
    Ok(())
}

fn print_board(cells: &str) {
    let cells: Vec<char> = cells.chars().collect();
    if cells.len() != 9 {
        return;
    }
    for row in cells.chunks(3) {
        println!("   {} | {} | {}", row[0], row[1], row[2]);
    }
}
