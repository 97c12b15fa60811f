//! Column-name normalisation for the source tables
//!
//! Header cells are compared after lower-casing and removing spaces,
//! underscores, dashes, dots and parentheses, so "Pay Date", "pay_date" and
//! "PayDate" all resolve to the same column. The header is always the first
//! row of the file.

/// Logical columns the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Ticker,
    Date,
    Close,
    PayDate,
    Amount,
    Name,
    Underlying,
    Issuer,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Ticker => "ticker",
            Column::Date => "date",
            Column::Close => "close",
            Column::PayDate => "pay_date",
            Column::Amount => "amount",
            Column::Name => "name",
            Column::Underlying => "underlying",
            Column::Issuer => "issuer",
        }
    }
}

/// A column, its accepted header spellings (already normalised), and
/// whether the table is unusable without it
pub struct ColumnSpec {
    pub column: Column,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

const TICKER_ALIASES: &[&str] = &["ticker", "symbol", "tickersymbol"];

pub const PRICE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        column: Column::Ticker,
        aliases: TICKER_ALIASES,
        required: true,
    },
    ColumnSpec {
        column: Column::Date,
        aliases: &["date", "tradedate", "day"],
        required: true,
    },
    ColumnSpec {
        column: Column::Close,
        aliases: &[
            "close",
            "closingprice",
            "closeprice",
            "price",
            "adjclose",
            "last",
        ],
        required: true,
    },
];

pub const DIVIDEND_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        column: Column::Ticker,
        aliases: TICKER_ALIASES,
        required: true,
    },
    ColumnSpec {
        column: Column::PayDate,
        aliases: &["paydate", "paymentdate", "paiddate", "date"],
        required: true,
    },
    ColumnSpec {
        column: Column::Amount,
        aliases: &[
            "amount",
            "amountpershare",
            "dividend",
            "dividendpershare",
            "distribution",
            "cashamount",
        ],
        required: true,
    },
];

pub const METADATA_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        column: Column::Ticker,
        aliases: TICKER_ALIASES,
        required: true,
    },
    ColumnSpec {
        column: Column::Name,
        aliases: &["name", "fundname", "fund"],
        required: false,
    },
    ColumnSpec {
        column: Column::Underlying,
        aliases: &["underlying", "underlyingasset", "reference"],
        required: false,
    },
    ColumnSpec {
        column: Column::Issuer,
        aliases: &["issuer", "provider", "family"],
        required: false,
    },
];

/// Canonical form of a header cell
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '.' | '(' | ')'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Header index for each logical column of a table
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: Vec<(Column, usize)>,
}

impl ColumnMap {
    /// Map `headers` onto `specs`.
    ///
    /// Aliases are tried in order so an exact "paydate" wins over a generic
    /// "date" when both exist. Returns the first missing required column.
    pub fn resolve<'a, I>(headers: I, specs: &[ColumnSpec]) -> Result<Self, Column>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let mut indices = Vec::with_capacity(specs.len());

        for spec in specs {
            let found = spec
                .aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias));
            match found {
                Some(idx) => indices.push((spec.column, idx)),
                None if spec.required => return Err(spec.column),
                None => {}
            }
        }

        Ok(Self { indices })
    }

    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, idx)| *idx)
    }
}
