use stock_core::Quote;

/// Collects caller quotes into the contiguous, ordered buffer the engine reads.
pub(crate) fn marshal_quotes<'a, I>(quotes: I) -> Vec<Quote>
where
    I: IntoIterator<Item = &'a Quote>,
{
    quotes.into_iter().cloned().collect()
}
