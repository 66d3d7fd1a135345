use claim_client::DeviceClaimClient;
use claim_core::device::DeviceInfo;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: connect-claim <host> <port> <path> <device-id> <device-public-key> <username> <access-token> [device-name]

Claims a receiver on the local network for a cloud account. Device
coordinates come from a discovery step, the access token from an OAuth
flow; both run outside this tool.";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 7 || args.len() > 8 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let port: u16 = match args[1].parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("Invalid port: {}", args[1]);
            return ExitCode::from(2);
        }
    };

    let device = DeviceInfo {
        host: args[0].clone(),
        port,
        path: args[2].clone(),
        device_id: args[3].clone(),
        public_key: args[4].clone(),
    };
    let username = &args[5];
    let access_token = &args[6];

    let mut client = match DeviceClaimClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to set up HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(device_name) = args.get(7) {
        client = client.device_name(device_name.clone());
    }

    println!(
        "Sending addUser to {} for account '{}'...",
        device.endpoint_url(),
        username
    );

    match client.claim(&device, username, access_token).await {
        Ok(response) => {
            match serde_json::to_string_pretty(response.as_json()) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", response.as_json()),
            }
            if let Some(status_string) = response.status_string() {
                println!("Device answered: {}", status_string);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Claim failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
