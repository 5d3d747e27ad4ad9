// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process;

use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use waveportal_client::{
    app::{App, SubmitOutcome, INSTALL_PROMPT},
    cli::{Opts, Subcommands},
    config,
    portal::{
        client::connect_signer_provider, PortalClient, PortalContract, WaveWatcher,
        MAX_MESSAGE_LEN, PORTAL,
    },
    session::{ConnectOutcome, LocalKeyProvider, SessionManager, WalletProvider},
};

#[tokio::main]
async fn main() {
    config::init_tracing();

    let opts = Opts::parse();

    if let Err(e) = run(opts).await {
        tracing::error!(error = %e, "Command failed");
        process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let network = opts.eth.chain.network();
    let rpc_url = opts
        .eth
        .rpc_url
        .clone()
        .unwrap_or_else(|| network.rpc_url.to_string());
    let contract_address = opts
        .eth
        .contract
        .clone()
        .or_else(|| PORTAL.address.map(str::to_string))
        .ok_or("no portal contract address configured")?;

    // Malformed key material degrades to "no wallet present".
    let env_key = std::env::var(config::PRIVATE_KEY_ENV).ok();
    let detected = match LocalKeyProvider::detect(env_key.as_deref(), opts.eth.keystore.as_deref())
    {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "Wallet key unusable");
            None
        }
    };

    let Some(key_provider) = detected else {
        if let Subcommands::Connect = opts.cmd {
            let mut session = SessionManager::<LocalKeyProvider>::new(None);
            if session.connect().await == ConnectOutcome::NoWallet {
                println!("{INSTALL_PROMPT}");
            }
        } else {
            tracing::warn!("No wallet provider configured");
            println!("{INSTALL_PROMPT}");
        }
        return Ok(());
    };

    let wallet = key_provider.ethereum_wallet()?;
    let provider = connect_signer_provider(&rpc_url, wallet)?;
    let portal = PortalClient::new(&provider, network, &contract_address)?;
    let portal_address = portal.address();

    let mut app = App::new(SessionManager::new(Some(key_provider)), portal);

    match opts.cmd {
        Subcommands::Connect => match app.connect().await {
            ConnectOutcome::Connected(account) => println!("Connected: {account}"),
            ConnectOutcome::NoWallet => println!("{INSTALL_PROMPT}"),
            ConnectOutcome::Failed => println!("Wallet connection failed, see logs."),
        },

        Subcommands::Count => {
            let total = app.portal().total_waves().await?;
            println!("{total}");
        }

        Subcommands::Waves { json } => {
            if app.restore_session().await.is_none() {
                println!("{INSTALL_PROMPT}");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(app.waves())?);
            } else if app.waves().is_empty() {
                println!("No waves yet.");
            } else {
                for wave in app.waves() {
                    println!("{wave}\n");
                }
            }
        }

        Subcommands::Wave { message } => {
            app.restore_session().await;

            match app.submit_wave(&message).await {
                SubmitOutcome::Submitted(receipt) => {
                    println!("Wave mined: {}", receipt.tx_hash);
                    println!("{}", receipt.explorer_url);
                    if !receipt.success {
                        println!("The transaction reverted on chain.");
                    }
                }
                SubmitOutcome::EmptyMessage => println!("A message is required to wave."),
                SubmitOutcome::MessageTooLong => {
                    println!("Keep the message under {MAX_MESSAGE_LEN} characters.")
                }
                SubmitOutcome::Failed => println!("Wave failed, see logs."),
            }
        }

        Subcommands::Watch => {
            if app.restore_session().await.is_some() {
                for wave in app.waves() {
                    println!("{wave}\n");
                }
            }

            let (sink, mut feed) = mpsc::unbounded_channel();
            let shutdown = CancellationToken::new();

            let watcher = WaveWatcher::new(provider.clone(), portal_address);
            let watcher_task = tokio::spawn(watcher.run(sink, shutdown.clone()));

            // Ctrl-C tears the subscription down.
            let signal_shutdown = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_shutdown.cancel();
                }
            });

            println!("Watching for new waves (Ctrl-C to stop)...");
            app.consume_feed(&mut feed, |wave| println!("{wave}\n")).await;

            let _ = watcher_task.await;
        }
    }

    Ok(())
}
