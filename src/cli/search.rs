use crate::{
    Res,
    cli::{Session, selected_kinds},
    command::Invocation,
    display, info,
    spotify::Gateway,
    types::Kind,
    utils,
};

/// Results requested per kind. Only the first few are printed, but all of
/// them stay addressable by number.
pub const SEARCH_LIMIT: u32 = 20;

pub async fn search<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let mut kinds = selected_kinds(inv);
    if kinds.is_empty() {
        kinds = Kind::ALL.to_vec();
    }
    let query = inv.text();

    let pb = utils::spinner(&format!("Searching for \"{}\"...", query));
    let results = session.gateway.search(&query, &kinds, SEARCH_LIMIT).await;
    pb.finish_and_clear();
    let results = results?;

    if results.is_empty() {
        info!("Nothing found for \"{}\".", query);
    } else {
        print!("{}", display::search_results(&results, &kinds));
    }

    session.cache.store(results);
    Ok(())
}
