use patricia::{Trie, TrieConfig, TrieSet, TrieString};

fn main() {
    // Store some paths, packing their fragments into shared chunks.
    let mut trie: TrieString<usize> = Trie::with_config(TrieConfig::new().with_min_chunk_size(256));
    for (i, path) in [
        "/home/user1/audio",
        "/home/user1/video",
        "/home/user1/video/x",
        "/home/user2/audio",
        "/home/user2/video",
    ]
    .iter()
    .enumerate()
    {
        trie.insert(path.chars(), i);
    }
    println!(
        "keys: {}, nodes: {}, chunks: {}",
        trie.len(),
        trie.node_count(),
        trie.chunk_count()
    );

    // Everything below user1
    let (cursor, exact) = trie.find_prefix_exact("/home/user1".chars());
    println!("under /home/user1 (stored: {exact})");
    for pair in cursor {
        println!(
            "key: {}, value: {}",
            String::from_iter(&pair.key),
            pair.value
        );
    }

    // Narrow a cursor which is already on a key
    let video = trie.find("/home/user1/video".chars());
    let (cursor, exact) = video.find_prefix("/".chars());
    println!("under /home/user1/video/ (stored: {exact})");
    for pair in cursor {
        println!("key: {}", String::from_iter(&pair.key));
    }

    // Count words
    let mut words: TrieSet<char> = Trie::new();
    for w in "the cat saw the other cat and the dog".split_whitespace() {
        words.add_key(w.chars());
    }
    println!("sorted word counts");
    for pair in words.iter_sorted() {
        println!("{}: {}", String::from_iter(&pair.key), pair.value);
    }
}
