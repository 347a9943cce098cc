//! helm-safe: safety gate for modifying Helm commands.
//!
//! Usage: `helm-safe <helm command> [args...]`, or `helm safe ...` when
//! installed as a Helm plugin. Exits 0 when helm succeeds or the user cancels,
//! and 1 when a safety check fails, helm cannot be started, or helm exits
//! non-zero (reported as `Error: exit status N`).

use std::io::Write;

use helm_safe::config::Config;
use helm_safe::exec::HelmExecutor;
use helm_safe::gate::Gate;
use helm_safe::kube::KubectlContextStore;
use helm_safe::logging::{self, LOG_LEVEL_ENV};
use helm_safe::target::Environment;
use helm_safe::target::env::HELM_BIN_ENV;

fn main() {
    let config = Config::load();
    let env = Environment::capture();
    logging::init(&config.settings, env.get(LOG_LEVEL_ENV));

    let args: Vec<String> = std::env::args().skip(1).collect();

    let store = KubectlContextStore::new(config.settings.kubectl_path());
    let executor = HelmExecutor::new(config.settings.helm_path(env.get(HELM_BIN_ENV)));
    let gate = Gate::new(&config, &env, &store, &executor);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let code = match gate.run(args, &mut input, &mut out) {
        Ok(_) => 0,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            1
        }
    };
    let _ = out.flush();
    std::process::exit(code);
}
