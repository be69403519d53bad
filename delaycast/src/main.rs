use clap::Parser;
use delaycast::app::DelaycastApp;

fn main() {
    env_logger::init();
    let args = DelaycastApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
