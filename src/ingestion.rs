use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::domain::traits::ActionStream;
use crate::domain::{Action, Catalog, Error, Money, Product, ProductId};

pub struct CsvCatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CsvCatalogReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self { reader: rdr }
    }

    /// Reads every row and validates the result as a whole.
    pub fn read(mut self) -> Result<Catalog, Error> {
        let products = self
            .reader
            .deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Ok(Product::from(row)),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(products)
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: ProductId,
    name: String,
    price: Money,
}

impl From<CsvRow> for Product {
    fn from(row: CsvRow) -> Self {
        Product::new(row.id, row.name, row.price)
    }
}

/// Line-oriented user commands, e.g. from stdin.
pub struct CommandReader<R> {
    lines: Option<Lines<R>>,
}

impl<R: AsyncBufRead + Unpin> CommandReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Some(reader.lines()),
        }
    }
}

/// Parses one command line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Option<Result<Action, Error>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let verb = parts[0].to_ascii_lowercase();
    let args = &parts[1..];

    let action = match (verb.as_str(), args) {
        ("buy" | "b", [id]) => parse_id(id).map(Action::Buy),
        ("sell" | "s", [id]) => parse_id(id).map(Action::Sell),
        ("set", [id, value @ ..]) => parse_id(id).map(|id| Action::SetQuantity {
            id,
            raw: value.join(" "),
        }),
        ("show" | "board", []) => Ok(Action::Show),
        ("help" | "h" | "?", []) => Ok(Action::Help),
        ("quit" | "exit" | "q", []) => Ok(Action::Quit),
        ("buy" | "b" | "sell" | "s", _) => Err(Error::Command(format!(
            "usage: {} <product id>",
            verb
        ))),
        ("set", _) => Err(Error::Command(
            "usage: set <product id> <quantity>".to_string(),
        )),
        (other, _) => Err(Error::Command(format!(
            "unknown command '{}', type 'help' for commands",
            other
        ))),
    };

    Some(action)
}

fn parse_id(raw: &str) -> Result<ProductId, Error> {
    raw.parse::<ProductId>()
        .map_err(|_| Error::Command(format!("invalid product id '{}'", raw)))
}

impl<R: AsyncBufRead + Unpin + Send + 'static> ActionStream for CommandReader<R> {
    type Actions = Pin<Box<dyn Stream<Item = Result<Action, Error>> + Send>>;

    fn stream(&mut self) -> Self::Actions {
        // A read error ends the stream after it has been reported once.
        let lines = self.lines.take();

        let actions = stream::unfold(lines, |lines| async move {
            let mut lines = lines?;
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(parsed) = parse_command(&line) {
                            return Some((parsed, Some(lines)));
                        }
                    }
                    Ok(None) => return None,
                    Err(e) => return Some((Err(Error::IO(e)), None)),
                }
            }
        });

        Box::pin(actions)
    }
}
