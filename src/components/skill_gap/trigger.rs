use crate::components::skill_graph::WeakSkillSet;

/// Identifies one settle window. Only the newest ticket may fire or land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settle {
	/// Set became empty: clear the result now, no call.
	Reset,
	/// A window was (re)started and is due `delay_ms` from the change.
	Scheduled { ticket: Ticket, delay_ms: u32 },
}

/// Cancel-and-restart debounce over the weak skill set.
///
/// `H` is the armed timer handle; replacing or clearing it must cancel the
/// timer (gloo's `Timeout` does this on drop). A fired handle is kept until the
/// next change, since its callback may still be running. Every change bumps the
/// generation. A window fires only if nothing newer arrived, and a response is
/// accepted only if its window is still the newest.
pub struct AnalysisTrigger<H> {
	delay_ms: u32,
	generation: u64,
	timer: Option<H>,
	pending: Option<(Ticket, WeakSkillSet)>,
	in_flight: Option<Ticket>,
}

impl<H> AnalysisTrigger<H> {
	pub fn new(delay_ms: u32) -> Self {
		Self {
			delay_ms,
			generation: 0,
			timer: None,
			pending: None,
			in_flight: None,
		}
	}

	/// Records a change, cancels the armed timer and arms a new one via `arm`
	/// unless the set is now empty.
	pub fn on_change(
		&mut self,
		weak: &WeakSkillSet,
		arm: impl FnOnce(Ticket, u32) -> H,
	) -> Settle {
		self.generation += 1;
		self.timer = None;
		if weak.is_empty() {
			self.pending = None;
			self.in_flight = None;
			return Settle::Reset;
		}
		let ticket = Ticket(self.generation);
		self.pending = Some((ticket, weak.clone()));
		self.timer = Some(arm(ticket, self.delay_ms));
		Settle::Scheduled {
			ticket,
			delay_ms: self.delay_ms,
		}
	}

	/// Timer callback for `ticket`. Returns the set to analyze if still current.
	pub fn fire(&mut self, ticket: Ticket) -> Option<WeakSkillSet> {
		if self.pending.as_ref()?.0 != ticket {
			return None;
		}
		let (_, weak) = self.pending.take()?;
		self.in_flight = Some(ticket);
		Some(weak)
	}

	/// Whether the response for `ticket` should be shown.
	pub fn complete(&mut self, ticket: Ticket) -> bool {
		if self.in_flight != Some(ticket) {
			return false;
		}
		self.in_flight = None;
		ticket.0 == self.generation
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	fn set(ids: &[&str]) -> WeakSkillSet {
		ids.iter().copied().collect()
	}

	/// Timer stand-in whose flag is cleared when the handle is dropped.
	struct FakeTimer {
		live: Rc<RefCell<bool>>,
	}

	impl Drop for FakeTimer {
		fn drop(&mut self) {
			*self.live.borrow_mut() = false;
		}
	}

	#[derive(Default)]
	struct Clock {
		armed: Vec<(f64, Ticket, Rc<RefCell<bool>>)>,
	}

	impl Clock {
		fn arm_at(&mut self, now: f64) -> impl FnOnce(Ticket, u32) -> FakeTimer + '_ {
			move |ticket, delay_ms| {
				let live = Rc::new(RefCell::new(true));
				self.armed.push((now + delay_ms as f64, ticket, live.clone()));
				FakeTimer { live }
			}
		}

		/// Timers still armed and due by `now`, in arming order.
		fn due(&mut self, now: f64) -> Vec<Ticket> {
			let (due, rest) = std::mem::take(&mut self.armed)
				.into_iter()
				.partition::<Vec<_>, _>(|(at, _, live)| *live.borrow() && *at <= now);
			self.armed = rest;
			due.into_iter().map(|(_, ticket, _)| ticket).collect()
		}
	}

	/// Applies `changes` on a 10ms step clock, firing timers the way the widget does.
	fn run(changes: &[(f64, WeakSkillSet)], until: f64) -> Vec<(f64, WeakSkillSet)> {
		let mut trigger = AnalysisTrigger::new(800);
		let mut clock = Clock::default();
		let mut fired = Vec::new();
		let mut t = 0.0;
		while t <= until {
			for (at, weak) in changes {
				if *at == t {
					trigger.on_change(weak, clock.arm_at(t));
				}
			}
			for ticket in clock.due(t) {
				if let Some(weak) = trigger.fire(ticket) {
					fired.push((t, weak));
				}
			}
			t += 10.0;
		}
		fired
	}

	#[test]
	fn rapid_toggles_fire_once_after_last() {
		let mut weak = WeakSkillSet::default();
		let mut changes = Vec::new();
		for (i, id) in ["py", "dsa", "js", "api", "sql"].iter().enumerate() {
			weak.toggle(id);
			changes.push((i as f64 * 100.0, weak.clone()));
		}
		let fired = run(&changes, 3000.0);
		assert_eq!(fired.len(), 1);
		assert_eq!(fired[0].0, 1200.0);
		assert_eq!(fired[0].1, set(&["py", "dsa", "js", "api", "sql"]));
	}

	#[test]
	fn separated_changes_fire_separately() {
		let fired = run(&[(0.0, set(&["py"])), (1000.0, set(&["py", "db"]))], 3000.0);
		let times: Vec<f64> = fired.iter().map(|(t, _)| *t).collect();
		assert_eq!(times, [800.0, 1800.0]);
	}

	#[test]
	fn only_the_last_ticket_fires() {
		let mut trigger = AnalysisTrigger::new(800);
		let mut weak = WeakSkillSet::default();
		let mut tickets = Vec::new();
		for id in ["py", "dsa", "js", "api", "sql"] {
			weak.toggle(id);
			match trigger.on_change(&weak, |_, _| ()) {
				Settle::Scheduled { ticket, delay_ms } => {
					assert_eq!(delay_ms, 800);
					tickets.push(ticket);
				}
				Settle::Reset => panic!("non-empty set must schedule"),
			}
		}
		let (last, stale) = tickets.split_last().unwrap();
		for ticket in stale {
			assert_eq!(trigger.fire(*ticket), None);
		}
		assert_eq!(trigger.fire(*last), Some(weak));
		assert_eq!(trigger.fire(*last), None);
	}

	#[test]
	fn restart_cancels_previous_timer() {
		let mut trigger = AnalysisTrigger::new(800);
		let mut clock = Clock::default();
		trigger.on_change(&set(&["py"]), clock.arm_at(0.0));
		trigger.on_change(&set(&["py", "js"]), clock.arm_at(100.0));
		let live: Vec<bool> = clock.armed.iter().map(|(_, _, l)| *l.borrow()).collect();
		assert_eq!(live, [false, true]);
	}

	#[test]
	fn clearing_resets_without_waiting() {
		let mut trigger = AnalysisTrigger::new(800);
		let mut clock = Clock::default();
		assert!(matches!(
			trigger.on_change(&set(&["py"]), clock.arm_at(0.0)),
			Settle::Scheduled { .. }
		));
		let settle = trigger.on_change(&WeakSkillSet::default(), clock.arm_at(100.0));
		assert_eq!(settle, Settle::Reset);
		assert_eq!(clock.armed.len(), 1, "an empty set must not arm a timer");
		assert!(clock.due(5000.0).is_empty());
	}

	#[test]
	fn stale_response_is_discarded() {
		let mut trigger = AnalysisTrigger::new(800);
		let Settle::Scheduled { ticket: first, .. } = trigger.on_change(&set(&["py"]), |_, _| ())
		else {
			panic!("expected a window");
		};
		assert!(trigger.fire(first).is_some());

		// user keeps clicking while the first call is slow
		let Settle::Scheduled { ticket: second, .. } =
			trigger.on_change(&set(&["py", "sql"]), |_, _| ())
		else {
			panic!("expected a window");
		};
		assert_eq!(trigger.fire(second), Some(set(&["py", "sql"])));

		assert!(!trigger.complete(first));
		assert!(trigger.complete(second));
	}

	#[test]
	fn response_after_clear_is_discarded() {
		let mut trigger = AnalysisTrigger::new(800);
		let Settle::Scheduled { ticket, .. } = trigger.on_change(&set(&["arch"]), |_, _| ()) else {
			panic!("expected a window");
		};
		assert!(trigger.fire(ticket).is_some());
		trigger.on_change(&WeakSkillSet::default(), |_, _| ());
		assert!(!trigger.complete(ticket));
	}
}
