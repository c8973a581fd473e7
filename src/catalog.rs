//! Static descriptions of every algorithm, shown next to the visualisation

use crate::algorithms::AlgorithmId;

/// Everything the UI and `--list` show about one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub reference: &'static str,
    /// Compact reference implementation displayed in the source pane
    pub code: &'static str,
}

impl AlgorithmDescriptor {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

static CATALOG: [AlgorithmDescriptor; 18] = [
    AlgorithmDescriptor {
        id: AlgorithmId::Bubble,
        description: "Repeatedly swaps adjacent elements if they are in the wrong order.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/bubble-sort/",
        code: r#"fn bubble_sort(a: &mut [i64]) {
    for i in 0..a.len() {
        let mut swapped = false;
        for j in 0..a.len() - i - 1 {
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Selection,
        description: "Repeatedly finds the minimum element from the unsorted part and puts it at the beginning.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/selection-sort/",
        code: r#"fn selection_sort(a: &mut [i64]) {
    for i in 0..a.len() {
        let mut min = i;
        for j in i + 1..a.len() {
            if a[j] < a[min] {
                min = j;
            }
        }
        a.swap(i, min);
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Insertion,
        description: "Builds the final sorted array one item at a time.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/insertion-sort/",
        code: r#"fn insertion_sort(a: &mut [i64]) {
    for i in 1..a.len() {
        let mut j = i;
        while j > 0 && a[j - 1] > a[j] {
            a.swap(j - 1, j);
            j -= 1;
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Gnome,
        description: "Based on the technique used by a standard garden gnome sorting his flower pots.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/gnome-sort-a-stupid-one/",
        code: r#"fn gnome_sort(a: &mut [i64]) {
    let mut i = 0;
    while i < a.len() {
        if i == 0 || a[i] >= a[i - 1] {
            i += 1;
        } else {
            a.swap(i, i - 1);
            i -= 1;
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Cocktail,
        description: "A variation of Bubble Sort that sorts in both directions.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/cocktail-sort/",
        code: r#"fn cocktail_sort(a: &mut [i64]) {
    let (mut start, mut end) = (0, a.len() - 1);
    let mut swapped = true;
    while swapped {
        swapped = false;
        for i in start..end {
            if a[i] > a[i + 1] {
                a.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        end -= 1;
        for i in (start..end).rev() {
            if a[i] > a[i + 1] {
                a.swap(i, i + 1);
                swapped = true;
            }
        }
        start += 1;
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Comb,
        description: "Improves on Bubble Sort by using a larger gap that shrinks by a factor of 1.3.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/comb-sort/",
        code: r#"fn comb_sort(a: &mut [i64]) {
    let mut gap = a.len();
    let mut swapped = true;
    while gap > 1 || swapped {
        gap = (gap * 10 / 13).max(1);
        swapped = false;
        for i in 0..a.len() - gap {
            if a[i] > a[i + gap] {
                a.swap(i, i + gap);
                swapped = true;
            }
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::OddEven,
        description: "A parallel variant of Bubble Sort using odd and even phases.",
        time_complexity: "O(n²)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/odd-even-sort-brick-sort/",
        code: r#"fn odd_even_sort(a: &mut [i64]) {
    let mut sorted = false;
    while !sorted {
        sorted = true;
        for start in [1, 0] {
            for i in (start..a.len() - 1).step_by(2) {
                if a[i] > a[i + 1] {
                    a.swap(i, i + 1);
                    sorted = false;
                }
            }
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Merge,
        description: "Divide and conquer algorithm that splits array in halves, sorts them and merges them.",
        time_complexity: "O(n log n)",
        space_complexity: "O(n)",
        reference: "https://www.geeksforgeeks.org/merge-sort/",
        code: r#"fn merge_sort(a: &mut [i64]) {
    if a.len() <= 1 {
        return;
    }
    let mid = a.len() / 2;
    merge_sort(&mut a[..mid]);
    merge_sort(&mut a[mid..]);
    let (left, right) = (a[..mid].to_vec(), a[mid..].to_vec());
    let (mut i, mut j) = (0, 0);
    for slot in a.iter_mut() {
        if j >= right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Quick,
        description: "Picks an element as pivot and partitions the given array around the picked pivot.",
        time_complexity: "O(n log n)",
        space_complexity: "O(log n)",
        reference: "https://www.geeksforgeeks.org/quick-sort/",
        code: r#"fn quick_sort(a: &mut [i64]) {
    if a.len() <= 1 {
        return;
    }
    let high = a.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if a[j] < a[high] {
            a.swap(store, j);
            store += 1;
        }
    }
    a.swap(store, high);
    quick_sort(&mut a[..store]);
    quick_sort(&mut a[store + 1..]);
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Heap,
        description: "Converts array into a heap data structure (max-heap), then extracts the max element.",
        time_complexity: "O(n log n)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/heap-sort/",
        code: r#"fn heap_sort(a: &mut [i64]) {
    for i in (0..a.len() / 2).rev() {
        sift_down(a, i, a.len());
    }
    for end in (1..a.len()).rev() {
        a.swap(0, end);
        sift_down(a, 0, end);
    }
}

fn sift_down(a: &mut [i64], mut root: usize, len: usize) {
    loop {
        let mut largest = root;
        for child in [2 * root + 1, 2 * root + 2] {
            if child < len && a[child] > a[largest] {
                largest = child;
            }
        }
        if largest == root {
            return;
        }
        a.swap(root, largest);
        root = largest;
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Intro,
        description: "Hybrid sorting algorithm that starts with Quick Sort and switches to Heap Sort if depth exceeds a limit.",
        time_complexity: "O(n log n)",
        space_complexity: "O(log n)",
        reference: "https://www.geeksforgeeks.org/introsort-or-introspective-sort/",
        code: r#"fn intro_sort(a: &mut [i64]) {
    let depth = 2 * a.len().max(1).ilog2() as usize;
    intro(a, depth);
}

fn intro(a: &mut [i64], depth: usize) {
    if a.len() < 16 {
        insertion_sort(a);
    } else if depth == 0 {
        heap_sort(a);
    } else {
        let p = partition(a);
        intro(&mut a[..p], depth - 1);
        intro(&mut a[p + 1..], depth - 1);
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Tim,
        description: "Hybrid algorithm derived from merge sort and insertion sort.",
        time_complexity: "O(n log n)",
        space_complexity: "O(n)",
        reference: "https://www.geeksforgeeks.org/timsort/",
        code: r#"const RUN: usize = 32;

fn tim_sort(a: &mut [i64]) {
    for run in a.chunks_mut(RUN) {
        insertion_sort(run);
    }
    let mut width = RUN;
    while width < a.len() {
        for left in (0..a.len()).step_by(2 * width) {
            let mid = (left + width).min(a.len());
            let right = (left + 2 * width).min(a.len());
            merge(&mut a[left..right], mid - left);
        }
        width *= 2;
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::DualPivot,
        description: "Uses two pivots to partition the array into three parts.",
        time_complexity: "O(n log n)",
        space_complexity: "O(log n)",
        reference: "https://www.geeksforgeeks.org/dual-pivot-quicksort/",
        code: r#"fn dual_pivot(a: &mut [i64], low: usize, high: usize) {
    if low >= high {
        return;
    }
    if a[low] > a[high] {
        a.swap(low, high);
    }
    let (p, q) = (a[low], a[high]);
    let (mut lt, mut gt, mut k) = (low + 1, high - 1, low + 1);
    while k <= gt {
        if a[k] < p {
            a.swap(k, lt);
            lt += 1;
        } else if a[k] >= q {
            while a[gt] > q && k < gt {
                gt -= 1;
            }
            a.swap(k, gt);
            gt -= 1;
            if a[k] < p {
                a.swap(k, lt);
                lt += 1;
            }
        }
        k += 1;
    }
    lt -= 1;
    gt += 1;
    a.swap(low, lt);
    a.swap(high, gt);
    // recurse on low..lt, lt+1..gt, gt+1..=high
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Counting,
        description: "Integer sorting algorithm that counts the distinct elements.",
        time_complexity: "O(n + k)",
        space_complexity: "O(k)",
        reference: "https://www.geeksforgeeks.org/counting-sort/",
        code: r#"fn counting_sort(a: &mut [i64]) {
    let min = *a.iter().min().unwrap();
    let max = *a.iter().max().unwrap();
    let mut count = vec![0usize; (max - min + 1) as usize];
    for &v in a.iter() {
        count[(v - min) as usize] += 1;
    }
    for i in 1..count.len() {
        count[i] += count[i - 1];
    }
    let mut out = vec![0; a.len()];
    for &v in a.iter().rev() {
        count[(v - min) as usize] -= 1;
        out[count[(v - min) as usize]] = v;
    }
    a.copy_from_slice(&out);
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Bucket,
        description: "Distributes elements into buckets, sorts buckets, then gathers them.",
        time_complexity: "O(n + k)",
        space_complexity: "O(n)",
        reference: "https://www.geeksforgeeks.org/bucket-sort-2/",
        code: r#"fn bucket_sort(a: &mut [i64]) {
    let max = a.iter().copied().max().unwrap_or(0).max(100);
    let mut buckets = vec![Vec::new(); 10];
    for &v in a.iter() {
        buckets[(v * 10 / (max + 1)) as usize].push(v);
    }
    let mut k = 0;
    for bucket in buckets.iter_mut() {
        insertion_sort(bucket);
        for &v in bucket.iter() {
            a[k] = v;
            k += 1;
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Radix,
        description: "Sorts integers by processing individual digits.",
        time_complexity: "O(nk)",
        space_complexity: "O(n + k)",
        reference: "https://www.geeksforgeeks.org/radix-sort/",
        code: r#"fn radix_sort(a: &mut [i64]) {
    let max = a.iter().copied().max().unwrap_or(0);
    let mut exp = 1;
    while max / exp > 0 {
        let mut count = [0usize; 10];
        for &v in a.iter() {
            count[((v / exp) % 10) as usize] += 1;
        }
        for d in 1..10 {
            count[d] += count[d - 1];
        }
        let mut out = vec![0; a.len()];
        for &v in a.iter().rev() {
            let d = ((v / exp) % 10) as usize;
            count[d] -= 1;
            out[count[d]] = v;
        }
        a.copy_from_slice(&out);
        exp *= 10;
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Bogo,
        description: "Ineffective algorithm that shuffles elements until they are sorted.",
        time_complexity: "O((n + 1)!)",
        space_complexity: "O(1)",
        reference: "https://www.geeksforgeeks.org/bogosort-permutation-sort/",
        code: r#"fn bogo_sort(a: &mut [i64], rng: &mut impl Rng) {
    while !a.windows(2).all(|w| w[0] <= w[1]) {
        for i in (1..a.len()).rev() {
            let j = rng.gen_range(0..=i);
            a.swap(i, j);
        }
    }
}"#,
    },
    AlgorithmDescriptor {
        id: AlgorithmId::Sleep,
        description: "Creates a thread for each element and sleeps for value-proportional time.",
        time_complexity: "O(n + V)",
        space_complexity: "O(n)",
        reference: "https://www.geeksforgeeks.org/sleep-sort-king-laziness-sorting-sleeping/",
        code: r#"fn sleep_sort(a: &[i64]) -> Vec<i64> {
    let (tx, rx) = std::sync::mpsc::channel();
    for &v in a {
        let tx = tx.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(v as u64));
            tx.send(v).unwrap();
        });
    }
    drop(tx);
    rx.iter().collect()
}"#,
    },
];

/// All descriptors in catalogue order
pub fn catalog() -> &'static [AlgorithmDescriptor] {
    &CATALOG
}

pub fn descriptor(id: AlgorithmId) -> &'static AlgorithmDescriptor {
    // CATALOG is laid out in AlgorithmId::ALL order
    &CATALOG[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_algorithm_order() {
        assert_eq!(catalog().len(), AlgorithmId::ALL.len());
        for (entry, id) in catalog().iter().zip(AlgorithmId::ALL) {
            assert_eq!(entry.id, id);
            assert_eq!(descriptor(id).id, id);
        }
    }

    #[test]
    fn test_every_entry_has_code_and_reference() {
        for entry in catalog() {
            assert!(!entry.code.is_empty(), "{} has no code", entry.name());
            assert!(entry.reference.starts_with("https://"));
        }
    }
}
