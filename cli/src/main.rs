fn main() {
    phone_bill_cli::run();
}
