use std::convert::Infallible;

use serde::Serialize;

/// Maximum number of items held by a single page.
pub const PAGE_SIZE: usize = 100;

/// A contiguous window `[start, end]` (both inclusive) over a longer sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
	pub start: usize,
	pub end: usize,
	pub items: Vec<T>,
}

/// A sequence that is either short enough to be shown as is, or split into pages.
/// Which layout is used depends only on the number of items.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum Paginated<T> {
	Flat(Vec<T>),
	Paged(Vec<Page<T>>),
}

impl<T> Paginated<T> {
	/// Total number of items across all pages.
	pub fn len(&self) -> usize {
		match self {
			Paginated::Flat(items) => items.len(),
			Paginated::Paged(pages) => pages.iter().map(|p| p.items.len()).sum(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over all items in order, ignoring the page layout.
	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		let (flat, paged): (&[T], &[Page<T>]) = match self {
			Paginated::Flat(items) => (items.as_slice(), [].as_slice()),
			Paginated::Paged(pages) => ([].as_slice(), pages.as_slice()),
		};
		flat.iter().chain(paged.iter().flat_map(|p| p.items.iter()))
	}

	/// Maps every item, keeping the page layout.
	pub fn map<U, F>(self, mut f: F) -> Paginated<U>
		where F: FnMut(T) -> U
	{
		match self {
			Paginated::Flat(items) => Paginated::Flat(items.into_iter().map(&mut f).collect()),
			Paginated::Paged(pages) => Paginated::Paged(
				pages.into_iter()
					.map(|p| Page {
						start: p.start,
						end: p.end,
						items: p.items.into_iter().map(&mut f).collect(),
					})
					.collect()
			),
		}
	}
}

/// Produces `count` items and groups them into pages of at most [`PAGE_SIZE`].
/// A result that fits into one page is returned flat.
pub fn paginate<T, F>(count: usize, mut produce: F) -> Paginated<T>
	where F: FnMut(usize) -> T
{
	match try_paginate::<_, Infallible, _>(count, |i| Ok(produce(i))) {
		Ok(out) => out,
		Err(never) => match never {},
	}
}

/// Fallible form of [`paginate`]. Stops at the first error.
pub fn try_paginate<T, E, F>(count: usize, mut produce: F) -> Result<Paginated<T>, E>
	where F: FnMut(usize) -> Result<T, E>
{
	let mut pages = Vec::with_capacity(count.div_ceil(PAGE_SIZE));
	let mut start = 0;
	while start < count {
		let end = usize::min(start + PAGE_SIZE, count) - 1;
		let items = (start..=end)
			.map(&mut produce)
			.collect::<Result<Vec<_>, E>>()?;
		pages.push(Page { start, end, items });
		start += PAGE_SIZE;
	}

	if pages.len() <= 1 {
		let items = pages.pop().map(|p| p.items).unwrap_or_default();
		return Ok(Paginated::Flat(items));
	}
	Ok(Paginated::Paged(pages))
}
