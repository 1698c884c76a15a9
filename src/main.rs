use rawhttp::Client;
use std::env;
use std::process;

fn help() {
    eprintln!("rawhttp [GET/POST] [URL]");
}

/// `<url>` or `<method> <url>`, nothing else.
fn method_and_url(args: &[String]) -> Option<(&str, &str)> {
    match args {
        [url] => Some(("GET", url.as_str())),
        [method, url] => Some((method.as_str(), url.as_str())),
        _ => None,
    }
}

fn main() {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_filters(&env::var("RUST_LOG").unwrap_or_default())
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let (method, url) = match method_and_url(&args) {
        Some(v) => v,
        None => {
            help();
            process::exit(1);
        }
    };

    match Client::new().dispatch(url, method, None) {
        Ok(res) => {
            println!("{}", res);
        }
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
