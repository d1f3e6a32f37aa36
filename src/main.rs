mod body;
mod err;
mod http;
mod opt;
mod routes;
mod stream;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let opt::Options {
        verbose,
        listen,
        root,
    } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let state = routes::State::new(root);

    log::info!(
        "Serving {} at http://{}/api/stream",
        state.root().display(),
        listen
    );

    http::run_simple_server(listen, state, routes::respond_to_request).await?;

    Ok(())
}
