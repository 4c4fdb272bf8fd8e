//! Echo peer — a stand-in for the network-server collaborator.
//!
//! Serves a [`PeerLink`] from a dedicated thread without any sockets:
//!
//! | Relay command  | Reaction                                   |
//! |----------------|--------------------------------------------|
//! | `Open`         | report `Connected`                         |
//! | `Send(frame)`  | report `DataReceived(frame)` (echo)        |
//! | `Close`        | stop serving                               |
//!
//! Used by the `tuio` console and by integration tests.  The thread
//! parks on the link's command signal between bursts.

use std::thread::JoinHandle;

use futures_lite::future;
use log::info;

use crate::error::{Error, Result};
use crate::link::{PeerEvent, PeerLink, RelayCommand};

/// Serve `link` on the calling thread until `Close`.  Returns every
/// command served, in order.
pub fn serve(link: &PeerLink) -> Vec<RelayCommand> {
    let mut served = Vec::new();
    loop {
        while let Some(command) = link.next_command() {
            served.push(command.clone());
            match command {
                RelayCommand::Open => {
                    info!("PEER: link open, peer connected");
                    link.notify(PeerEvent::Connected);
                }
                RelayCommand::Send(frame) => {
                    info!(
                        "PEER: echo tag={} ({} arg bytes)",
                        String::from_utf8_lossy(&frame.tag),
                        frame.args.len()
                    );
                    link.notify(PeerEvent::DataReceived(frame));
                }
                RelayCommand::Close => {
                    info!("PEER: link closed");
                    return served;
                }
            }
        }
        future::block_on(link.command_ready());
    }
}

/// Spawn [`serve`] on its own thread.
pub fn spawn(link: PeerLink) -> Result<JoinHandle<Vec<RelayCommand>>> {
    std::thread::Builder::new()
        .name("tuio-peer".into())
        .spawn(move || serve(&link))
        .map_err(Error::Spawn)
}
