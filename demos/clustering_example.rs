use learnkit::loading::{parse_centroids, parse_nodes};
use learnkit::report::format_clusters;
use learnkit::{Distance, KMeans};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== K-Means Clustering Example ===\n");

    // Three natural groups: around (2, 2), (8, 8) and (2, 8)
    let input = "\
# x y identity
1.5 1.8 A1
2.0 2.2 A2
2.3 1.9 A3
7.8 8.2 B1
8.1 7.9 B2
8.3 8.1 B3
1.9 7.8 C1
2.2 8.1 C2
1.7 8.3 C3
";

    let nodes = parse_nodes(input)?;
    println!("Dataset: {} nodes\n", nodes.len());

    for distance in [Distance::SquaredEuclidean, Distance::Manhattan] {
        let centroids = parse_centroids(&["0,0", "10,10", "0,10"])?;
        let result = KMeans::new(nodes.clone(), centroids, distance)?.run()?;

        println!("--- distance={} ---", distance);
        println!("Converged after {} iteration(s), inertia {:.4}", result.iterations, result.inertia);
        for line in format_clusters(&result) {
            println!("{}", line);
        }
        println!();
    }

    // Bad starting points leave a centroid without members; it stays put
    let centroids = parse_centroids(&["0,0", "100,100"])?;
    let result = KMeans::new(nodes, centroids, Distance::SquaredEuclidean)?
        .max_iter(50)
        .run()?;
    println!("--- two centroids, one far away ---");
    for line in format_clusters(&result) {
        println!("{}", line);
    }

    Ok(())
}
