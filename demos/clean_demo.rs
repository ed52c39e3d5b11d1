use lob_core::{Book, Side};

fn main() {
    println!("Clean Book Demo");
    println!("===============");

    let mut book = Book::new();

    println!("Created empty book");
    println!("Best bid: {:?}", book.best_bid());
    println!("Best ask: {:?}", book.best_ask());

    println!("\n1. Submitting orders:");
    let submissions = [
        (Side::Buy, 4950, 100, 1u64),
        (Side::Buy, 4940, 200, 2),
        (Side::Sell, 5050, 150, 3),
        (Side::Sell, 5060, 100, 4),
    ];
    for (side, price, shares, id) in submissions {
        match book.submit(side, price, shares, id, 1000) {
            Ok(()) => println!("Submitted order {id}"),
            Err(e) => println!("Error submitting order {id}: {e}"),
        }
    }

    println!("\nBook state:");
    println!("Best bid: {:?}", book.best_bid());
    println!("Best ask: {:?}", book.best_ask());
    println!("Total orders: {}", book.total_orders());
    println!("Bids: {:?}", book.levels(Side::Buy, 5));
    println!("Asks: {:?}", book.levels(Side::Sell, 5));

    println!("\n2. Cancelling order 2:");
    match book.cancel(2, 1001) {
        Ok(cancelled) => println!("Cancelled: {cancelled}"),
        Err(e) => println!("Error cancelling order: {e}"),
    }

    println!("\n3. Rejected duplicate submission:");
    match book.submit(Side::Sell, 5070, 50, 1, 1002) {
        Ok(()) => println!("Unexpectedly accepted"),
        Err(e) => println!("Rejected as expected: {e}"),
    }

    println!("\nFinal state:");
    println!("Best bid: {:?}", book.best_bid());
    println!("Best ask: {:?}", book.best_ask());
    println!("Total orders: {}", book.total_orders());
    println!("Total levels: {}", book.total_levels());
    println!("Bids: {:?}", book.levels(Side::Buy, 5));
    println!("Asks: {:?}", book.levels(Side::Sell, 5));
}
