use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use proptest::prelude::*;

use super::test_fixtures::{Engine, Zoo, engine, named};
use crate::extract::positional;
use crate::{Call, EngineConfig, MultiMethod, OverridePolicy, RegisterError};

/// Invariant: Fail-policy checks are linearizable.
///
/// Racing registrations of one signature under [`OverridePolicy::Fail`] must leave exactly
/// one entry; every other thread observes a conflict.
pub(crate) fn inv_concurrent_fail_registrations() {
	let z = Arc::new(Zoo::new());
	let mm = Arc::new(engine());
	let wins = Arc::new(AtomicUsize::new(0));
	let conflicts = Arc::new(AtomicUsize::new(0));

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let (z, mm) = (Arc::clone(&z), Arc::clone(&mm));
			let (wins, conflicts) = (Arc::clone(&wins), Arc::clone(&conflicts));
			thread::spawn(move || {
				match mm.register([z.int.clone()], OverridePolicy::Fail, named("int")) {
					Ok(_) => wins.fetch_add(1, Ordering::SeqCst),
					Err(RegisterError::Conflict { .. }) => conflicts.fetch_add(1, Ordering::SeqCst),
					Err(e) => panic!("unexpected error: {e}"),
				};
			})
		})
		.collect();
	for h in handles {
		h.join().unwrap();
	}

	assert_eq!(wins.load(Ordering::SeqCst), 1);
	assert_eq!(conflicts.load(Ordering::SeqCst), 7);
	assert_eq!(mm.len(), 1);
}

#[test]
fn test_concurrent_fail_registrations() {
	inv_concurrent_fail_registrations()
}

/// Invariant: no lost updates under concurrent Silent registration.
pub(crate) fn inv_no_lost_updates() {
	let z = Arc::new(Zoo::new());
	let mm = Arc::new(engine());

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let (z, mm) = (Arc::clone(&z), Arc::clone(&mm));
			thread::spawn(move || {
				for _ in 0..25 {
					mm.register([z.animal.clone()], OverridePolicy::Silent, named("animal"))
						.unwrap();
				}
			})
		})
		.collect();
	for h in handles {
		h.join().unwrap();
	}

	assert_eq!(mm.len(), 100);
	let ordinals: Vec<u32> = mm.methods.load().iter().map(|r| r.ordinal).collect();
	assert_eq!(ordinals, (0..100).collect::<Vec<u32>>());
}

#[test]
fn test_no_lost_updates() {
	inv_no_lost_updates()
}

/// Invariant: concurrent readers agree with a single-threaded resolution.
pub(crate) fn inv_concurrent_invoke_is_stable() {
	let z = Arc::new(Zoo::new());
	let mm: Arc<Engine> = Arc::new(engine());
	mm.register([z.animal.clone()], OverridePolicy::Silent, named("animal"))
		.unwrap();
	mm.register([z.cat.clone()], OverridePolicy::Silent, named("cat"))
		.unwrap();

	let handles: Vec<_> = (0..4)
		.map(|i| {
			let (z, mm) = (Arc::clone(&z), Arc::clone(&mm));
			thread::spawn(move || {
				for n in 0..50 {
					if (n + i) % 10 == 0 {
						mm.clear_cache();
					}
					let tom = Call::positional([z.obj(&z.cat, "tom")]);
					let rex = Call::positional([z.obj(&z.puppy, "rex")]);
					assert_eq!(mm.invoke(&tom).unwrap(), "cat");
					assert_eq!(mm.invoke(&rex).unwrap(), "animal");
				}
			})
		})
		.collect();
	for h in handles {
		h.join().unwrap();
	}
}

#[test]
fn test_concurrent_invoke_is_stable() {
	inv_concurrent_invoke_is_stable()
}

/// Invariant: a clearing registration is not undone by a resolve that read the old table.
///
/// A reader keeps missing the cache while `define` publishes a more specific handler; once
/// `define` has returned, the next call must see it.
pub(crate) fn inv_clearing_registration_not_undone_by_inflight_resolve() {
	let z = Arc::new(Zoo::new());
	let mut stale = 0;

	for _ in 0..200 {
		let mm: Arc<Engine> = Arc::new(engine());
		mm.define([z.animal.clone()]).implement(named("animal")).unwrap();
		for _ in 0..300 {
			mm.register([z.str.clone()], OverridePolicy::Silent, named("str"))
				.unwrap();
		}

		let stop = Arc::new(AtomicBool::new(false));
		let reader = {
			let (z, mm, stop) = (Arc::clone(&z), Arc::clone(&mm), Arc::clone(&stop));
			thread::spawn(move || {
				let rex = Call::positional([z.obj(&z.dog, "rex")]);
				while !stop.load(Ordering::SeqCst) {
					mm.clear_cache();
					mm.invoke(&rex).unwrap();
				}
			})
		};

		mm.define([z.dog.clone()]).implement(named("dog")).unwrap();
		stop.store(true, Ordering::SeqCst);
		reader.join().unwrap();

		if mm.invoke(&Call::positional([z.obj(&z.dog, "rex")])).unwrap() != "dog" {
			stale += 1;
		}
	}

	assert_eq!(stale, 0);
}

#[test]
fn test_clearing_registration_not_undone_by_inflight_resolve() {
	inv_clearing_registration_not_undone_by_inflight_resolve()
}

/// Invariant: `clear_cache_on_register` gives bare registration the same guarantee.
pub(crate) fn inv_clear_on_register_not_undone_by_inflight_resolve() {
	let z = Arc::new(Zoo::new());
	let config = EngineConfig::default().with_clear_cache_on_register(true);

	for _ in 0..100 {
		let mm: Arc<Engine> = Arc::new(MultiMethod::with_config(config.clone(), positional));
		mm.register([z.animal.clone()], OverridePolicy::Silent, named("animal"))
			.unwrap();

		let stop = Arc::new(AtomicBool::new(false));
		let reader = {
			let (z, mm, stop) = (Arc::clone(&z), Arc::clone(&mm), Arc::clone(&stop));
			thread::spawn(move || {
				let rex = Call::positional([z.obj(&z.dog, "rex")]);
				while !stop.load(Ordering::SeqCst) {
					mm.invoke(&rex).unwrap();
				}
			})
		};

		mm.register([z.dog.clone()], OverridePolicy::Silent, named("dog"))
			.unwrap();
		stop.store(true, Ordering::SeqCst);
		reader.join().unwrap();

		assert_eq!(
			mm.invoke(&Call::positional([z.obj(&z.dog, "rex")])).unwrap(),
			"dog"
		);
	}
}

#[test]
fn test_clear_on_register_not_undone_by_inflight_resolve() {
	inv_clear_on_register_not_undone_by_inflight_resolve()
}

fn arb_type_index() -> impl Strategy<Value = usize> {
	0usize..9
}

proptest! {
	/// Invariant: the cache is transparent.
	///
	/// For any registration set and call shape, warm, cold and freshly cleared lookups
	/// agree.
	#[test]
	fn test_cache_transparency(
		registered in prop::collection::vec(arb_type_index(), 1..8),
		probes in prop::collection::vec(arb_type_index(), 1..16),
	) {
		let z = Zoo::new();
		let types = [
			&z.number, &z.int, &z.bool, &z.float, &z.animal, &z.dog, &z.puppy, &z.cat, &z.str,
		];

		let mm = engine();
		for (i, &t) in registered.iter().enumerate() {
			let tag = i.to_string();
			mm.register([types[t].clone()], OverridePolicy::Silent, move |_, _| tag.clone())
				.unwrap();
		}

		for &p in &probes {
			let c = Call::positional([z.obj(types[p], "probe")]);
			let cold = mm.invoke(&c).ok();
			let warm = mm.invoke(&c).ok();
			mm.clear_cache();
			let cleared = mm.invoke(&c).ok();
			prop_assert_eq!(&cold, &warm);
			prop_assert_eq!(&cold, &cleared);
		}
	}
}
