//! Terminal admin dashboard. Polls the request list every 10 seconds while
//! unlocked, with client-side filtering and sort toggling. The admin key is
//! held only in memory for this run and discarded on lock or a 401.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration, MissedTickBehavior};

use requestbox::dashboard::api::{ApiClient, ApiError};
use requestbox::dashboard::{filter_and_sort, FetchKind, Session, SortDir};

const POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "requestbox-admin", about = "Admin dashboard for requestbox")]
struct Args {
    /// Base URL of the requestbox server.
    #[arg(long, default_value = "http://127.0.0.1:39080")]
    url: String,
    /// Admin key. If omitted, use the `unlock` command.
    #[arg(long)]
    key: Option<String>,
}

struct Dashboard {
    api: ApiClient,
    session: Session,
    query: String,
    sort: SortDir,
}

impl Dashboard {
    fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Session::new(),
            query: String::new(),
            sort: SortDir::NewestFirst,
        }
    }

    async fn refresh(&mut self, background: bool) {
        let Some(kind) = self.session.begin_fetch(background) else {
            return;
        };
        if kind == FetchKind::Initial {
            println!("loading…");
        } else {
            println!("refreshing…");
        }

        let key = self.session.key().expect("fetch admitted while locked");
        match self.api.list(key).await {
            Ok(rows) => {
                self.session.complete_fetch(rows);
                self.render();
            }
            Err(ApiError::Unauthorized(_)) => {
                self.session.fail_fetch(true);
                println!("that admin key didn't work — locked");
            }
            Err(e) => {
                self.session.fail_fetch(false);
                println!("could not load requests: {e}");
            }
        }
    }

    async fn delete(&mut self, id: &str) {
        if self.session.begin_fetch(false).is_none() {
            return;
        }
        let key = self.session.key().expect("fetch admitted while locked");
        match self.api.delete(key, id).await {
            Ok(()) => {
                self.session.end_fetch();
                self.session.remove_row(id);
                println!("deleted");
                self.render();
            }
            Err(ApiError::Unauthorized(_)) => {
                self.session.fail_fetch(true);
                println!("that admin key didn't work — locked");
            }
            Err(e) => {
                self.session.fail_fetch(false);
                println!("could not delete: {e}");
            }
        }
    }

    fn render(&self) {
        let rows = filter_and_sort(self.session.rows(), &self.query, self.sort);
        if rows.is_empty() {
            println!("(no requests)");
            return;
        }
        for r in &rows {
            println!("{}  {:20}  {:40}  {}", r.id, r.name, r.song, r.created_at);
        }
        let dir = match self.sort {
            SortDir::NewestFirst => "newest",
            SortDir::OldestFirst => "oldest",
        };
        println!("-- {} shown, sort: {dir} first --", rows.len());
    }

    async fn handle(&mut self, line: &str) -> bool {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match cmd {
            "unlock" => {
                if self.session.unlock(rest) {
                    self.refresh(false).await;
                } else {
                    println!("enter the admin key to continue, e.g. `unlock <key>`");
                }
            }
            "lock" => {
                self.session.lock();
                println!("locked");
            }
            "filter" => {
                self.query = rest.to_string();
                self.render();
            }
            "sort" => {
                self.sort = self.sort.toggled();
                self.render();
            }
            "refresh" | "r" => self.refresh(false).await,
            "delete" => self.delete(rest).await,
            "quit" | "q" => return false,
            "" => {}
            _ => println!(
                "commands: unlock <key> | lock | filter <text> | sort | refresh | delete <id> | quit"
            ),
        }
        true
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let mut dashboard = Dashboard::new(ApiClient::new(args.url));

    if let Some(key) = args.key {
        if dashboard.session.unlock(&key) {
            dashboard.refresh(false).await;
        }
    } else {
        println!("locked — `unlock <key>` to begin");
    }

    let mut ticker = interval(POLL_INTERVAL);
    // A tick that lands while a fetch is being awaited is dropped.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                dashboard.refresh(true).await;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if !dashboard.handle(&line).await {
                            break;
                        }
                    }
                    _ => break,
                }
            }
        }
    }
}
