use tucancrab::{parse_notation, renumber_atoms, to_canonical_notation_of};

// Hand-written inputs; none of them needs to be in canonical form and no two
// are isomorphic.
const MOLECULES: &[&str] = &[
    // Simple
    "2:1/C,C/(1-2)",
    "2:1/C,O/(1=2)",
    "2:1/C,C/(1#2)",
    "2:1/C,N/(1#2)",
    "2:0/C,O/",
    // Heteroatoms
    "3:2/C,C,O/(1-2)(2-3)",
    "3:2/C,O,C/(1-2)(2-3)",
    "3:2/C,C,Cl/(1-2)(2-3)",
    "3:2/Br,C,C/(1-2)(2-3)",
    // Branching
    "4:3/C,C,C,C/(1-2)(1-3)(1-4)",
    "5:4/C,C,C,C,C/(1-2)(1-3)(1-4)(1-5)",
    "4:3/C,C,O,O/(1-2)(2=3)(2-4)",
    "4:3/O,C,N,C/(2=1)(2-3)(4-2)",
    // Rings
    "3:3/C,C,C/(1-2)(2-3)(1-3)",
    "4:4/C,C,C,C/(1-2)(2-3)(3-4)(1-4)",
    "6:6/C,C,C,C,C,C/(1-2)(2-3)(3-4)(4-5)(5-6)(1-6)",
    "6:6/C,C,C,C,C,C/(1:2)(2:3)(3:4)(4:5)(5:6)(1:6)",
    "6:6/C,C,C,C,C,C/(1=2)(2-3)(3=4)(4-5)(5=6)(1-6)",
    "6:6/C,C,C,N,C,C/(1:2)(2:3)(3:4)(4:5)(5:6)(1:6)",
    "5:5/O,C,C,C,C/(1:2)(2:3)(3:4)(4:5)(1:5)",
    "10:11/C,C,C,C,C,C,C,C,C,C/(1:2)(2:3)(3:4)(4:5)(5:6)(1:6)(6:7)(7:8)(8:9)(9:10)(5:10)",
    // Regular graphs refinement alone cannot split
    "6:6/C,C,C,C,C,C/(1-2)(2-3)(1-3)(4-5)(5-6)(4-6)",
    "6:9/C,C,C,C,C,C/(1-2)(2-3)(1-3)(4-5)(5-6)(4-6)(1-4)(2-5)(3-6)",
    "6:9/C,C,C,C,C,C/(1-4)(1-5)(1-6)(2-4)(2-5)(2-6)(3-4)(3-5)(3-6)",
    "8:12/C,C,C,C,C,C,C,C/(1-2)(2-3)(3-4)(1-4)(5-6)(6-7)(7-8)(5-8)(1-5)(2-6)(3-7)(4-8)",
    "10:15/C,C,C,C,C,C,C,C,C,C/(1-2)(2-3)(3-4)(4-5)(1-5)(1-6)(2-7)(3-8)(4-9)(5-10)(6-8)(8-10)(7-10)(7-9)(6-9)",
    // Charged
    "4:3/C,N+1,O,O-1/(1-2)(2=3)(2-4)",
    "5:2/Na+1,Cl-1,C,C,O/(3-4)(4-5)",
    "2:1/Fe+3,O-2/(1-2)",
    // Isotopes
    "5:4/C,2H,2H,2H,2H/(1-2)(1-3)(1-4)(1-5)",
    "5:4/C,2H,H,H,H/(1-2)(1-3)(1-4)(1-5)",
    "7:7/13C,C,C,C,C,C,C/(1-2)(2:3)(3:4)(4:5)(5:6)(6:7)(2:7)",
    // Multi-component
    "4:2/C,C,C,C/(1-2)(3-4)",
    "6:3/C,O,C,O,C,O/(1-2)(3-4)(5-6)",
    // Larger
    "14:15/C,N,C,N,C,C,C,O,N,C,O,N,C,C/(1-2)(2-3)(3=4)(4-5)(5=6)(6-2)(6-7)(7=8)(7-9)(9-10)(10=11)(10-12)(12-5)(12-13)(9-14)",
    "13:13/C,C,O,O,C,C,C,C,C,C,C,O,O/(1-2)(2=3)(2-4)(4-5)(5:6)(6:7)(7:8)(8:9)(9:10)(10:5)(6-11)(11=12)(11-13)",
];

fn canonical(notation: &str) -> String {
    let mol = parse_notation(notation).unwrap_or_else(|e| panic!("parse failed for '{notation}': {e}"));
    to_canonical_notation_of(&mol)
}

fn all_permutations(n: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut state: Vec<usize> = (0..n).collect();
    result.push(state.clone());
    if n <= 1 {
        return result;
    }
    let mut c = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                state.swap(0, i);
            } else {
                state.swap(c[i], i);
            }
            result.push(state.clone());
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    result
}

struct Xorshift64(u64);

impl Xorshift64 {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn shuffle(&mut self, slice: &mut [usize]) {
        for i in (1..slice.len()).rev() {
            let j = (self.next() % (i as u64 + 1)) as usize;
            slice.swap(i, j);
        }
    }
}

fn random_permutations(n: usize, count: usize) -> Vec<Vec<usize>> {
    let mut rng = Xorshift64(0x5EED_1234_ABCD_0042);
    (0..count)
        .map(|_| {
            let mut perm: Vec<usize> = (0..n).collect();
            rng.shuffle(&mut perm);
            perm
        })
        .collect()
}

const EXHAUSTIVE_THRESHOLD: usize = 7;
const RANDOM_SAMPLE_COUNT: usize = 200;

fn permutations_for(n: usize) -> Vec<Vec<usize>> {
    if n <= EXHAUSTIVE_THRESHOLD {
        all_permutations(n)
    } else {
        random_permutations(n, RANDOM_SAMPLE_COUNT)
    }
}

#[test]
fn determinism() {
    for &notation in MOLECULES {
        let mol = parse_notation(notation).unwrap_or_else(|e| panic!("parse failed for '{notation}': {e}"));
        let a = to_canonical_notation_of(&mol);
        let b = to_canonical_notation_of(&mol);
        assert_eq!(a, b, "determinism failed for '{notation}': '{a}' vs '{b}'");
    }
}

#[test]
fn round_trip_idempotence() {
    for &notation in MOLECULES {
        let first = canonical(notation);
        let second = canonical(&first);
        assert_eq!(
            first, second,
            "round-trip failed for '{notation}': first='{first}', second='{second}'"
        );
    }
}

#[test]
fn permutation_invariance() {
    for &notation in MOLECULES {
        let mol = parse_notation(notation).unwrap_or_else(|e| panic!("parse failed for '{notation}': {e}"));
        let expected = to_canonical_notation_of(&mol);
        let n = mol.atom_count();
        for perm in permutations_for(n) {
            let renum = renumber_atoms(&mol, &perm)
                .unwrap_or_else(|e| panic!("renumber failed for '{notation}' with perm {perm:?}: {e}"));
            let got = to_canonical_notation_of(&renum);
            assert_eq!(
                expected, got,
                "permutation invariance failed for '{notation}' with perm {perm:?}: \
                 expected='{expected}', got='{got}'"
            );
        }
    }
}

#[test]
fn distinct_molecules_stay_distinct() {
    let mut seen: Vec<(String, &str)> = Vec::new();
    for &notation in MOLECULES {
        let c = canonical(notation);
        if c.is_empty() {
            continue;
        }
        if let Some((_, other)) = seen.iter().find(|(s, _)| *s == c) {
            panic!("'{notation}' and '{other}' both canonicalize to '{c}'");
        }
        seen.push((c, notation));
    }
}
