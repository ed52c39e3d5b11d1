use lob_core::{Book, Side};

fn main() {
    tracing_subscriber::fmt::init();

    let mut book = Book::new();

    println!("lob-core demo");
    println!("=============");
    println!("best bid: {:?}, best ask: {:?}", book.best_bid(), book.best_ask());

    book.submit(Side::Buy, 4950, 100, 1, 1000).unwrap();
    book.submit(Side::Buy, 4940, 200, 2, 1001).unwrap();
    book.submit(Side::Sell, 5050, 150, 3, 1002).unwrap();
    book.submit(Side::Sell, 5060, 100, 4, 1003).unwrap();

    println!("\nafter four submissions:");
    println!("best bid: {:?}", book.best_bid());
    println!("best ask: {:?}", book.best_ask());
    println!("total orders: {}", book.total_orders());
    println!("total levels: {}", book.total_levels());
    println!("bids: {:?}", book.levels(Side::Buy, 5));
    println!("asks: {:?}", book.levels(Side::Sell, 5));

    match book.submit(Side::Buy, 4950, 100, 1, 1004) {
        Ok(()) => println!("\nunexpectedly accepted a duplicate id"),
        Err(e) => println!("\nrejected duplicate id 1: {e}"),
    }

    let cancelled = book.cancel(2, 1005).unwrap();
    println!("\ncancelled: {cancelled}");
    println!("best bid: {:?}", book.best_bid());
    println!("total orders: {}", book.total_orders());
}
