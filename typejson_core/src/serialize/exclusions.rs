/// Effective excluded member names for one type.
///
/// `ignored` are the names a type declares through `#[json(ignore)]`, `requested` the
/// caller's list. With only one side present that side wins. With both present only the
/// requested, non-blank names that are also declared ignored remain, so a caller's list can
/// narrow the declared exclusions but never widen them.
pub fn merge_exclusions<'a>(ignored: &[&'a str], requested: &'a [String]) -> Vec<&'a str> {
	let requested = requested
		.iter()
		.map(String::as_str)
		.filter(|name| !name.trim().is_empty())
		.collect::<Vec<_>>();

	if ignored.is_empty() {
		requested
	} else if requested.is_empty() {
		ignored.to_vec()
	} else {
		requested.into_iter().filter(|name| ignored.contains(name)).collect()
	}
}
