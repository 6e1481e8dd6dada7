/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Single-writer ownership of an order book.
//!
//! An [`OrderBookHandle`] talks to a Tokio task that owns exactly one
//! [`OrderBook`]. Feed ingestion and queries are sent as commands over an
//! mpsc channel and answered over oneshot channels. The task handles one
//! command at a time, so a consumer can never observe a ladder halfway
//! through an event.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::types::{BookStatus, DepthEvent, DepthSnapshot, ReplaySummary};
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, trace};

/// Default number of commands that may queue before senders wait
pub const DEFAULT_COMMAND_CAPACITY: usize = 1024;

type ReadJob = Box<dyn FnOnce(&OrderBook) + Send>;

/// Requests served by the owning task.
enum Command {
    Snapshot {
        snapshot: DepthSnapshot,
        buffered: Vec<DepthEvent>,
        reply: oneshot::Sender<ReplaySummary>,
    },
    Event {
        event: DepthEvent,
        reply: oneshot::Sender<Result<(), OrderBookError>>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
    Resync {
        snapshot: DepthSnapshot,
        buffered: Vec<DepthEvent>,
        reply: oneshot::Sender<ReplaySummary>,
    },
    Read(ReadJob),
}

/// Cloneable handle to a task that exclusively owns one order book.
///
/// The task stops once every handle is dropped. Calls made after the task
/// has stopped fail with [`OrderBookError::HandleClosed`].
#[derive(Debug, Clone)]
pub struct OrderBookHandle {
    symbol: String,
    sender: mpsc::Sender<Command>,
}

impl OrderBookHandle {
    /// Move `book` into a new Tokio task and return a handle to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(book: OrderBook) -> (Self, JoinHandle<()>) {
        Self::spawn_with_capacity(book, DEFAULT_COMMAND_CAPACITY)
    }

    /// Like [`OrderBookHandle::spawn`] with an explicit command queue size.
    pub fn spawn_with_capacity(book: OrderBook, capacity: usize) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let symbol = book.symbol().to_string();
        let task = tokio::spawn(Self::run(book, receiver));
        (Self { symbol, sender }, task)
    }

    async fn run(mut book: OrderBook, mut receiver: mpsc::Receiver<Command>) {
        info!("Order book task started for {}", book.symbol());

        while let Some(command) = receiver.recv().await {
            match command {
                Command::Snapshot {
                    snapshot,
                    buffered,
                    reply,
                } => {
                    let summary = book.process_snapshot(&snapshot, &buffered);
                    let _ = reply.send(summary);
                }
                Command::Event { event, reply } => {
                    let _ = reply.send(book.process_event(&event));
                }
                Command::Clear { reply } => {
                    book.clear();
                    let _ = reply.send(());
                }
                Command::Resync {
                    snapshot,
                    buffered,
                    reply,
                } => {
                    book.clear();
                    let _ = reply.send(book.process_snapshot(&snapshot, &buffered));
                }
                Command::Read(job) => job(&book),
            }
        }

        info!("Order book task stopped for {}", book.symbol());
    }

    /// Symbol of the owned book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn closed(&self) -> OrderBookError {
        OrderBookError::HandleClosed {
            symbol: self.symbol.clone(),
        }
    }

    async fn request<R>(
        &self,
        command: Command,
        reply: oneshot::Receiver<R>,
    ) -> Result<R, OrderBookError> {
        self.sender.send(command).await.map_err(|_| self.closed())?;
        reply.await.map_err(|_| self.closed())
    }

    /// Load the book from a snapshot plus buffered events.
    pub async fn process_snapshot(
        &self,
        snapshot: DepthSnapshot,
        buffered: Vec<DepthEvent>,
    ) -> Result<ReplaySummary, OrderBookError> {
        let (reply, rx) = oneshot::channel();
        self.request(
            Command::Snapshot {
                snapshot,
                buffered,
                reply,
            },
            rx,
        )
        .await
    }

    /// Apply one live event; see [`OrderBook::process_event`].
    pub async fn process_event(&self, event: DepthEvent) -> Result<(), OrderBookError> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Event { event, reply }, rx).await?
    }

    /// Clear the book; see [`OrderBook::clear`].
    pub async fn clear(&self) -> Result<(), OrderBookError> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Clear { reply }, rx).await
    }

    /// Clear the book and load it again from a fresh snapshot.
    ///
    /// Both steps run back to back on the owning task, so no event can slip
    /// in between them.
    pub async fn resync(
        &self,
        snapshot: DepthSnapshot,
        buffered: Vec<DepthEvent>,
    ) -> Result<ReplaySummary, OrderBookError> {
        trace!("Order book {}: resync requested", self.symbol);
        let (reply, rx) = oneshot::channel();
        self.request(
            Command::Resync {
                snapshot,
                buffered,
                reply,
            },
            rx,
        )
        .await
    }

    /// Run `f` against the book on the owning task and return its result.
    pub async fn read<R, F>(&self, f: F) -> Result<R, OrderBookError>
    where
        F: FnOnce(&OrderBook) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job: ReadJob = Box::new(move |book| {
            let _ = reply.send(f(book));
        });
        self.request(Command::Read(job), rx).await
    }

    /// Health view of the book
    pub async fn status(&self) -> Result<BookStatus, OrderBookError> {
        self.read(|book| book.status()).await
    }

    /// Midpoint of the best bid and ask
    pub async fn market_price(&self) -> Result<Decimal, OrderBookError> {
        self.read(|book| book.simulator().market_price()).await?
    }

    /// Best ask price
    pub async fn first_ask_price(&self) -> Result<Decimal, OrderBookError> {
        self.read(|book| book.simulator().first_ask_price()).await?
    }

    /// Best bid price
    pub async fn first_bid_price(&self) -> Result<Decimal, OrderBookError> {
        self.read(|book| book.simulator().first_bid_price()).await?
    }

    /// Base received for spending `amount` quote against the asks
    pub async fn ask_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.read(move |book| book.simulator().ask_conversion(amount))
            .await?
    }

    /// Quote received for selling `amount` base into the bids
    pub async fn bid_conversion(&self, amount: Decimal) -> Result<Decimal, OrderBookError> {
        self.read(move |book| book.simulator().bid_conversion(amount))
            .await?
    }

    /// Quote needed to buy `amount` base from the asks
    pub async fn ask_reverse_conversion(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, OrderBookError> {
        self.read(move |book| book.simulator().ask_reverse_conversion(amount))
            .await?
    }

    /// Base to sell into the bids to raise `amount` quote
    pub async fn bid_reverse_conversion(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, OrderBookError> {
        self.read(move |book| book.simulator().bid_reverse_conversion(amount))
            .await?
    }

    /// Ask levels a buy of `amount` needs with the best ask at or under `max_price`
    pub async fn buy_depth_requirement(
        &self,
        max_price: Decimal,
        amount: Decimal,
    ) -> Result<usize, OrderBookError> {
        self.read(move |book| book.simulator().buy_depth_requirement(max_price, amount))
            .await?
    }

    /// Bid levels a sell of `amount` needs with the best bid at or above `min_price`
    pub async fn sell_depth_requirement(
        &self,
        min_price: Decimal,
        amount: Decimal,
    ) -> Result<usize, OrderBookError> {
        self.read(move |book| book.simulator().sell_depth_requirement(min_price, amount))
            .await?
    }

    /// Export the current ladders as a snapshot
    pub async fn to_snapshot(&self) -> Result<DepthSnapshot, OrderBookError> {
        self.read(|book| book.to_snapshot()).await
    }
}
