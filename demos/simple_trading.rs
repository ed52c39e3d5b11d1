use lob_core::{Book, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    println!("Simple Book Simulation");
    println!("======================");

    let mut book = Book::with_capacity(1000, 100);
    let mut rng = StdRng::seed_from_u64(42);
    let mut order_id = 1u64;
    let mut timestamp = 1000u64;

    println!("\nPhase 1: Building initial order book...");

    for price in 4990..5000 {
        let quantity = rng.gen_range(100..500);
        book.submit(Side::Buy, price, quantity, order_id, timestamp).unwrap();
        order_id += 1;
        timestamp += 1;
    }

    for price in 5001..5011 {
        let quantity = rng.gen_range(100..500);
        book.submit(Side::Sell, price, quantity, order_id, timestamp).unwrap();
        order_id += 1;
        timestamp += 1;
    }

    print_market_state(&book, "Initial Market State");

    println!("\nPhase 2: Cancelling a spread of resting orders...");
    let mut cancelled_shares = 0u64;
    for id in (1..order_id).step_by(3) {
        if let Ok(order) = book.cancel(id, timestamp) {
            cancelled_shares += order.shares;
            timestamp += 1;
        }
    }
    println!("Cancelled {cancelled_shares} shares across every third order");

    print_market_state(&book, "After Cancellations");

    println!("\nFinal Statistics:");
    println!("Total orders in book: {}", book.total_orders());
    println!("Total price levels: {}", book.total_levels());

    let bids = book.levels(Side::Buy, usize::MAX);
    let asks = book.levels(Side::Sell, usize::MAX);
    let total_buy_volume: u64 = bids.iter().map(|(_, qty)| *qty).sum();
    let total_sell_volume: u64 = asks.iter().map(|(_, qty)| *qty).sum();
    println!("Total buy volume: {total_buy_volume}");
    println!("Total sell volume: {total_sell_volume}");
}

fn print_market_state(book: &Book, title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(title.len()));
    println!("Best Bid: {:?}", book.best_bid());
    println!("Best Ask: {:?}", book.best_ask());
    println!("Orders: {}, Levels: {}", book.total_orders(), book.total_levels());
}
