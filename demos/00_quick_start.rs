/// quick start - record two transactions and print the report
use interest_ledger::Ledger;

fn main() {
    env_logger::init();

    let mut ledger = Ledger::standard();

    ledger.add_transaction_now("2024-01-01", "1000", None);
    ledger.add_transaction_now("2024-03-15", "250.50", None);

    // rejected silently, nothing is recorded
    ledger.add_transaction_now("", "100", None);

    println!("{}", ledger.report());
}
