use std::collections::BTreeSet;

/// Object URLs handed to viewer tabs that still need revoking.
///
/// A URL is released by whichever comes first, its timer or an app-wide
/// [`drain`](Self::drain); `release` reports whether the caller should revoke,
/// so each URL is revoked exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlobLeases {
	live: BTreeSet<String>,
}

impl BlobLeases {
	pub fn acquire(&mut self, url: impl Into<String>) {
		self.live.insert(url.into());
	}

	pub fn release(&mut self, url: &str) -> bool {
		self.live.remove(url)
	}

	pub fn drain(&mut self) -> Vec<String> {
		std::mem::take(&mut self.live).into_iter().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn timer_release_happens_once() {
		let mut leases = BlobLeases::default();
		leases.acquire("blob:a");
		assert!(leases.release("blob:a"));
		assert!(!leases.release("blob:a"));
		assert!(leases.drain().is_empty());
	}

	#[test]
	fn cleanup_preempts_timer() {
		let mut leases = BlobLeases::default();
		leases.acquire("blob:a");
		leases.acquire("blob:b");
		assert_eq!(leases.drain(), ["blob:a", "blob:b"]);
		// timers that fire later find nothing left to revoke
		assert!(!leases.release("blob:a"));
		assert!(!leases.release("blob:b"));
	}
}
