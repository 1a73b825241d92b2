#[tokio::main]
async fn main() {
    if let Err(e) = care4u_lib::run().await {
        eprintln!("care4u: {e}");
        std::process::exit(1);
    }
}
