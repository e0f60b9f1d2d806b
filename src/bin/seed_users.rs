use ticket_seeder::{runner, Job};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runner::run_main(Job::Users).await
}
