use crate::calendar::event::Event;

/// Case-insensitive substring match on name or description. Every event
/// matches the empty query.
pub fn matches(event: &Event, query: &str) -> bool {
    let needle = query.to_lowercase();
    event.name.to_lowercase().contains(&needle) || event.description.to_lowercase().contains(&needle)
}

/// Keeps the events that [`matches`] `query`, in input order.
pub fn filter<'a, I>(events: I, query: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events.into_iter().filter(|e| matches(e, query)).collect()
}
