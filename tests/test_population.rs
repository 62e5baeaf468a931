use genpaint::{
    population::{make_child, Inheritance},
    BlendRule, Gene, Individual, PixelGrid, Population, RandomNumberGenerator,
};

fn sorted_population(size: usize, seed: u64) -> Population {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let reference = PixelGrid::filled(20, 20, [30, 140, 220]);
    let mut population = Population::random(size, 40, 20, 20, &mut rng);
    for individual in population.individuals_mut() {
        individual.evaluate(&reference, BlendRule::Averaged).unwrap();
    }
    population.sort_by_fitness();
    population
}

#[test]
fn test_breed_keeps_size_across_generations() {
    let mut rng = RandomNumberGenerator::from_seed(1);
    let reference = PixelGrid::filled(20, 20, [30, 140, 220]);
    let mut population = sorted_population(25, 2);

    for _ in 0..5 {
        population.breed(&mut rng).unwrap();
        assert_eq!(population.len(), 25);
        for individual in population.individuals_mut() {
            individual.evaluate(&reference, BlendRule::Averaged).unwrap();
        }
        population.sort_by_fitness();
    }
}

#[test]
fn test_breed_keeps_size_of_unsorted_population() {
    let mut rng = RandomNumberGenerator::from_seed(4);
    for size in [3, 11, 27] {
        let mut population = Population::random(size, 15, 12, 9, &mut rng);
        assert!(population.individuals().iter().all(|i| i.fitness().is_none()));

        population.breed(&mut rng).unwrap();

        assert_eq!(population.len(), size);
        assert!(population.individuals().iter().all(|i| i.genes().len() == 15));
    }
}

#[test]
fn test_make_child_inheritance_shares() {
    // Distinct genes per position make the origin of every child gene observable.
    let mum_genes: Vec<Gene> = (0..990)
        .map(|i| Gene::new(i, 0, 1, 1, [255, 0, 0], 200))
        .collect();
    let dad_genes: Vec<Gene> = (0..990)
        .map(|i| Gene::new(i, 1, 1, 1, [0, 0, 255], 200))
        .collect();
    let mum = Individual::new(mum_genes.clone());
    let dad = Individual::new(dad_genes.clone());
    let mut rng = RandomNumberGenerator::from_seed(3);

    let (mut from_mum, mut from_dad, mut fresh) = (0usize, 0usize, 0usize);
    for _ in 0..100 {
        let child = make_child(&mum, &dad, 1000, 1000, &mut rng);
        for (i, gene) in child.genes().iter().enumerate() {
            if *gene == mum_genes[i] {
                from_mum += 1;
            } else if *gene == dad_genes[i] {
                from_dad += 1;
            } else {
                fresh += 1;
            }
        }
    }

    let total = 99_000.0;
    assert!((fresh as f64 / total - 1.0 / 99.0).abs() < 0.003);
    assert!((from_mum as f64 / total - 48.0 / 99.0).abs() < 0.01);
    assert!((from_dad as f64 / total - 50.0 / 99.0).abs() < 0.01);
}

#[test]
fn test_inheritance_roll_is_reproducible() {
    let mut rng1 = RandomNumberGenerator::from_seed(4);
    let mut rng2 = RandomNumberGenerator::from_seed(4);
    let a: Vec<Inheritance> = (0..500).map(|_| Inheritance::roll(&mut rng1)).collect();
    let b: Vec<Inheritance> = (0..500).map(|_| Inheritance::roll(&mut rng2)).collect();
    assert_eq!(a, b);
}

#[test]
fn test_mass_mutation_after_breeding() {
    let mut rng = RandomNumberGenerator::from_seed(5);
    let mut population = sorted_population(12, 6);

    population.breed(&mut rng).unwrap();
    let bred = population.clone();
    population.mass_mutate(&mut rng);

    assert_eq!(population.len(), 12);
    assert_eq!(population.individuals()[..3], bred.individuals()[..3]);
    for (before, after) in bred.individuals()[3..]
        .iter()
        .zip(&population.individuals()[3..])
    {
        assert_ne!(before.genes(), after.genes());
    }
}
