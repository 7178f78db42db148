#[tokio::main]
async fn main() {
    photo_quest_node::run().await;
}
