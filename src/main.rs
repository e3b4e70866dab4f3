use anyhow::Result;
use movielens_dash::config::DashboardConfig;
use movielens_dash::logging::{log, obj, v_str, Domain, Level};
use movielens_dash::server::Dashboard;
use std::env;

fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "serve".to_string());

    match command.as_str() {
        "serve" => {
            log(
                Level::Info,
                Domain::System,
                "startup",
                obj(&[("title", v_str(&cfg.title)), ("bind", v_str(&cfg.bind))]),
            );
            println!("{} running at http://{}", cfg.title, cfg.bind);
            println!();
            println!("Endpoints:");
            println!("  GET /                - Vue d'ensemble");
            println!("  GET /pages/<slug>    - vue-ensemble | tags | films");
            println!("  GET /api/artifacts   - Chart file status as JSON");
            println!("  GET /api/health      - Health check");
            println!();
            Dashboard::from_config(cfg).serve()
        }
        "render" => {
            let slug = args.next().unwrap_or_else(|| "vue-ensemble".to_string());
            let mut dash = Dashboard::from_config(cfg);
            match dash.render_html(&slug)? {
                Some(doc) => {
                    print!("{}", doc);
                    Ok(())
                }
                None => {
                    eprintln!("unknown page: {}", slug);
                    std::process::exit(2);
                }
            }
        }
        other => {
            eprintln!("usage: movielens-dash [serve | render <page>]");
            eprintln!("unknown command: {}", other);
            std::process::exit(1);
        }
    }
}
