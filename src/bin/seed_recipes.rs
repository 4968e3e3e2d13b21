//! CLI tool to fill the database with demo recipes.
//!
//! Usage:
//!   cargo run --bin seed-recipes -- --count 40
//!   cargo run --bin seed-recipes -- --count 5 --unpublished

use std::env;

use recipes_lib::config::Config;
use recipes_lib::db::DbPool;
use recipes_lib::error::AppResult;
use recipes_lib::models::NewRecipe;

const DEFAULT_COUNT: usize = 20;

const AUTHORS: [(&str, &str, &str, &str); 2] = [
    ("ana", "Ana", "Souza", "Bakes bread on weekends and cakes every other day."),
    ("joao", "Joao", "Lima", "Weeknight dinners in under thirty minutes."),
];

const CATEGORIES: [&str; 4] = ["Breakfast", "Lunch", "Dinner", "Desserts"];

const TAGS: [&str; 4] = ["Vegetarian", "Quick", "Baking", "Comfort Food"];

const DISHES: [(&str, &str); 6] = [
    ("Carrot Cake", "Moist carrot cake with chocolate topping"),
    ("Mushroom Risotto", "Creamy arborio rice with sauteed mushrooms"),
    ("Black Bean Soup", "Smoky soup finished with lime"),
    ("Banana Pancakes", "Fluffy pancakes sweetened with ripe bananas"),
    ("Lemon Pasta", "Spaghetti tossed with lemon, butter and parmesan"),
    ("Cheese Bread", "Crisp outside, chewy inside"),
];

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut published = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                i += 1;
                count = match args.get(i).and_then(|v| v.parse::<usize>().ok()) {
                    Some(n) => n,
                    None => {
                        eprintln!("Error: --count needs a non-negative number");
                        std::process::exit(1);
                    }
                };
            }
            "--unpublished" => published = false,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            std::process::exit(1);
        }
    };

    match runtime.block_on(seed(&config, count, published)) {
        Ok(inserted) => {
            println!();
            println!("  Seeded {} {} recipes", inserted, if published { "published" } else { "unpublished" });
            println!();
        }
        Err(e) => {
            eprintln!("Error seeding recipes: {}", e);
            std::process::exit(1);
        }
    }
}

async fn seed(config: &Config, count: usize, published: bool) -> AppResult<usize> {
    let pool = DbPool::new(config).await?;
    pool.run_migrations().await?;

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for (username, first_name, last_name, bio) in AUTHORS {
        let author = match pool.get_author_by_username(username).await? {
            Some(author) => author,
            None => {
                let email = format!("{}@example.com", username);
                pool.insert_author(username, first_name, last_name, Some(&email), bio)
                    .await?
            }
        };
        author_ids.push(author.id);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = match pool.get_category_by_name(name).await? {
            Some(category) => category,
            None => pool.insert_category(name).await?,
        };
        category_ids.push(category.id);
    }

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = match pool.get_tag_by_slug(&recipes_lib::models::slugify(name)).await? {
            Some(tag) => tag,
            None => pool.insert_tag(name).await?,
        };
        tag_ids.push(tag.id);
    }

    let mut serial = 1usize;
    for n in 0..count {
        let (dish, description) = DISHES[n % DISHES.len()];

        // Titles must be unique; slugs follow from them.
        let title = loop {
            let candidate = format!("{} {}", dish, serial);
            serial += 1;
            if !pool.recipe_title_taken(&candidate).await? {
                break candidate;
            }
        };

        let recipe = pool
            .insert_recipe(NewRecipe {
                title,
                description: description.to_string(),
                slug: String::new(),
                preparation_time: 10 + (n % 6) as i32 * 10,
                preparation_time_unit: "Minutes".to_string(),
                servings: 2 + (n % 4) as i32,
                servings_unit: "People".to_string(),
                preparation_steps: format!("Prepare the {}.\nServe warm.", dish.to_lowercase()),
                is_published: published,
                category_id: Some(category_ids[n % category_ids.len()]),
                author_id: Some(author_ids[n % author_ids.len()]),
                tag_ids: vec![tag_ids[n % tag_ids.len()], tag_ids[(n + 1) % tag_ids.len()]],
            })
            .await?;

        println!("  + {} ({})", recipe.title, recipe.slug);
    }

    Ok(count)
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: seed-recipes [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --count <N>     Number of recipes to insert (default: {})", DEFAULT_COUNT);
    eprintln!("      --unpublished   Insert recipes hidden from listings");
    eprintln!("  -h, --help          Show this help message");
    eprintln!();
    eprintln!("Authors, categories and tags are created on first run and reused afterwards.");
    eprintln!();
}
