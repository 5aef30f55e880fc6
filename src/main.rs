use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracking_lookup::{
    HttpBackend, QueryController,
    config::Config,
    debounce::spawn_debounce,
    render::render_result,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let backend = HttpBackend::new(config.api_base_url.clone())?;
    let controller = Arc::new(QueryController::new(backend, config.mode));

    let (raw_tx, mut committed_rx) = spawn_debounce(Duration::from_millis(config.debounce_ms));

    println!("Enter a tracking number (empty line re-runs the last lookup):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    None => break,
                    Some(input) => {
                        let input = input.trim().to_string();
                        if input.is_empty() {
                            // Submit control: re-run against the committed query.
                            controller.search().await;
                            render(&controller);
                        } else {
                            raw_tx.send(input)?;
                        }
                    }
                }
            }
            committed = committed_rx.recv() => {
                match committed {
                    None => break,
                    Some(query) => {
                        controller.commit(query);
                        controller.search().await;
                        render(&controller);
                    }
                }
            }
        }
    }

    Ok(())
}

fn render(controller: &Arc<QueryController<HttpBackend>>) {
    let state = controller.state();
    let state = match state.lock() {
        Ok(state) => state,
        Err(_) => return,
    };

    if let Some(ref error) = state.error {
        eprintln!("Error: {}", error);
        return;
    }

    if let Some(ref result) = state.result {
        print!("{}", render_result(result));
    }
}
