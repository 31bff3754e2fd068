// Node / SharedPtr reference-counting test suite.
//
// The core invariants exercised:
// - Count accuracy: at quiescent points (no clone/drop in flight),
//   handle_count() equals the number of live handles exactly.
// - Single release: the release hook fires exactly once, on the 1 → 0
//   transition, regardless of how many threads cloned and dropped.
// - Hook override: a pool payload is reclaimed, not freed.
// - Moves are free: moving a handle never changes the count.
use guarded::{Node, Release, SafeQueue};
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::sync::{Arc, Mutex};

// Payload that records release-hook invocations.
struct Probe {
    value: i32,
    released: Arc<AtomicUsize>,
}

impl Release for Probe {
    fn release(self: Box<Self>) {
        self.released.fetch_add(1, SeqCst);
        // Box drops here: release still frees the payload.
    }
}

fn probe(value: i32) -> (Node<Probe>, Arc<AtomicUsize>) {
    let released = Arc::new(AtomicUsize::new(0));
    let node = Node::new(Probe {
        value,
        released: released.clone(),
    });
    (node, released)
}

// Test: count tracks live handles at quiescent points.
// Verifies: binding = 1; each clone +1; each drop -1; hook fires exactly
// once when the last handle drops.
#[test]
fn count_matches_live_handles() {
    let (n1, released) = probe(10);
    assert_eq!(n1.handle_count(), 1);

    let n2 = n1.clone();
    let n3 = n2.clone();
    assert_eq!(n1.handle_count(), 3);
    assert_eq!(n3.data().value, 10);

    drop(n2);
    assert_eq!(n1.handle_count(), 2);
    assert_eq!(released.load(SeqCst), 0);

    drop(n1);
    drop(n3);
    assert_eq!(released.load(SeqCst), 1);
}

// Test: moving a handle does not touch the count.
#[test]
fn moves_do_not_change_count() {
    let (n, _released) = probe(1);
    assert_eq!(n.handle_count(), 1);
    let moved = n;
    assert_eq!(moved.handle_count(), 1);

    let boxed = Box::new(moved);
    assert_eq!(boxed.handle_count(), 1);
}

// Test: Deref and ptr_eq semantics.
#[test]
fn deref_and_identity() {
    let (n, _released) = probe(77);
    assert_eq!(n.value, 77);

    let clone = n.clone();
    assert!(Node::ptr_eq(&n, &clone));

    let (other, _r) = probe(77);
    assert!(!Node::ptr_eq(&n, &other));
}

// Pool payload: the release hook returns the allocation to a pool instead
// of freeing it.
struct PooledBuf {
    pool: Arc<Mutex<Vec<Box<PooledBuf>>>>,
    data: Vec<u8>,
}

impl Release for PooledBuf {
    fn release(mut self: Box<Self>) {
        self.data.clear();
        let pool = self.pool.clone();
        pool.lock().unwrap().push(self);
    }
}

// Test: release-hook override reclaims instead of freeing.
// Verifies: after the last handle drops, the allocation sits in the pool.
#[test]
fn release_hook_can_return_to_pool() {
    let pool: Arc<Mutex<Vec<Box<PooledBuf>>>> = Arc::new(Mutex::new(Vec::new()));
    let node = Node::from_box(Box::new(PooledBuf {
        pool: pool.clone(),
        data: vec![1, 2, 3],
    }));
    assert_eq!(pool.lock().unwrap().len(), 0);

    drop(node);
    let pooled = pool.lock().unwrap();
    assert_eq!(pooled.len(), 1);
    assert!(pooled[0].data.is_empty());
}

// Test: concurrent clone/drop stress on one shared payload.
// 4 threads each perform 10,000 clone+drop cycles on handles to the same
// node. Verifies: no lost updates (final count equals the surviving
// handle), no double free (hook fires exactly once, afterwards).
#[test]
fn concurrent_clone_drop_stress() {
    const THREADS: usize = 4;
    const CYCLES: usize = 10_000;

    let (node, released) = probe(1);

    std::thread::scope(|s| {
        for _ in 0..THREADS {
            let node = node.clone();
            s.spawn(move || {
                for _ in 0..CYCLES {
                    let extra = node.clone();
                    assert_eq!(extra.data().value, 1);
                    drop(extra);
                }
            });
        }
    });

    assert_eq!(node.handle_count(), 1);
    assert_eq!(released.load(SeqCst), 0);
    drop(node);
    assert_eq!(released.load(SeqCst), 1);
}

// Test: nodes flow through a SafeQueue across threads.
// The queue's internal copy plus the consumer's pop each hold a handle;
// the payload is released exactly once after every handle is gone.
#[test]
fn node_through_queue_across_threads() {
    const ITEMS: i32 = 100;
    let q: SafeQueue<Node<Probe>> = SafeQueue::new();
    let released = Arc::new(AtomicUsize::new(0));

    std::thread::scope(|s| {
        let q = &q;
        let producer_released = released.clone();
        s.spawn(move || {
            for i in 0..ITEMS {
                let node = Node::new(Probe {
                    value: i,
                    released: producer_released.clone(),
                });
                q.push(node.clone());
                // Producer's own handle drops here; the queue's keeps the
                // payload alive.
            }
        });

        let consumer = s.spawn(move || {
            let mut sum = 0;
            for _ in 0..ITEMS {
                let node = q.pop();
                sum += node.data().value;
            }
            sum
        });

        assert_eq!(consumer.join().unwrap(), (0..ITEMS).sum::<i32>());
    });

    assert_eq!(released.load(SeqCst), ITEMS as usize);
}
