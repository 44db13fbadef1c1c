use std::net::SocketAddr;
use std::process::exit;
use std::time::Duration;

use clap::Parser;

use kvnode::NodeClient;

const DEFAULT_ADDR: &str = "127.0.0.1:4000";

#[derive(Parser)]
#[command(name = "kvnode-client", version, about = "Send one command to a kvnode")]
struct Cli {
    /// Node address
    #[arg(long, default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
    addr: SocketAddr,

    /// Milliseconds to wait for the response
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// The command, e.g. `PUT key some value`, `GET key` or `DELETE key`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let client = NodeClient::connect(cli.addr).unwrap_or_else(|e| {
        eprintln!("Failed to open socket: {e}");
        exit(1);
    });
    if let Err(e) = client.set_timeout(Duration::from_millis(cli.timeout_ms)) {
        eprintln!("{e}");
        exit(1);
    }

    match client.request(&cli.command.join(" ")) {
        Ok(response) if response.starts_with("ERROR:") => {
            println!("{response}");
            exit(1);
        }
        Ok(response) => println!("{response}"),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    }
}
