use lob_core::{Book, Side};

fn main() {
    println!("Simple Book Demo - Level Aggregates");
    println!("====================================");

    let mut book = Book::new();

    println!("Created empty book");
    println!("Best bid: {:?}", book.best_bid());
    println!("Best ask: {:?}", book.best_ask());

    println!("\n1. Submitting orders at a shared price level:");
    book.submit(Side::Buy, 4950, 100, 1, 1000).unwrap();
    book.submit(Side::Buy, 4950, 200, 2, 1001).unwrap();
    book.submit(Side::Buy, 4940, 50, 3, 1002).unwrap();
    book.submit(Side::Sell, 5050, 150, 4, 1003).unwrap();

    println!("Total orders: {}", book.total_orders());
    println!("Total levels: {}", book.total_levels());

    println!("\n2. Level aggregates:");
    if let Some(level) = book.level_at(Side::Buy, 4950) {
        println!(
            "Buy @ 4950: count={}, size={}, volume={}",
            level.count, level.size, level.volume
        );
    }
    if let Some(level) = book.level_at(Side::Buy, 4940) {
        println!(
            "Buy @ 4940: count={}, size={}, volume={}",
            level.count, level.size, level.volume
        );
    }

    println!("\n3. Cancelling one of two orders sharing a level:");
    book.cancel(1, 1004).unwrap();
    let level = book.level_at(Side::Buy, 4950).unwrap();
    println!("Buy @ 4950 after cancel: count={}, size={}", level.count, level.size);

    println!("\n4. Cancelling the last order at a level collapses it:");
    book.cancel(3, 1005).unwrap();
    println!("Buy @ 4940 exists: {}", book.level_at(Side::Buy, 4940).is_some());
    println!("Total levels: {}", book.total_levels());
}
