use tokio::net::TcpListener;

use requestbox::config::Config;
use requestbox::routes;
use requestbox::state::AppState;
use requestbox::store::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "requestbox=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    requestbox::error::set_verbose_errors(!config.production);
    print_banner(&config);

    let state = AppState {
        store: Store::new(config.database_url.clone()),
        admin_key: config.admin_key.clone(),
    };

    let app = routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36mrequestbox\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!(
        "  \x1b[2mdatabase\x1b[0m     {}",
        config.database_url.as_deref().unwrap_or("(not configured)")
    );
    eprintln!(
        "  \x1b[2madmin key\x1b[0m    {}",
        if config.admin_key.is_some() {
            "set"
        } else {
            "(not configured)"
        }
    );

    if config.production {
        eprintln!();
        eprintln!("  \x1b[33mproduction mode: internal errors redacted\x1b[0m");
    }

    eprintln!();
}
