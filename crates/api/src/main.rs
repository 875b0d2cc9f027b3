// 声明模块结构：
// `application`: 包含应用启动逻辑。
// `handlers`: 包含 HTTP 路由处理逻辑（健康检查与 webhook）。
// `state`: 包含应用共享状态定义。
mod application;
mod handlers;
mod state;


use std::process::ExitCode;

use tracing::error;

// `#[actix_web::main]` 宏将异步 main 函数标记为 actix-web 程序的入口点。
#[actix_web::main]
async fn main() -> ExitCode {
    match application::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // 日志订阅器安装失败时退回到标准错误输出。
            if tracing::dispatcher::has_been_set() {
                error!("bootstrap failed: {err}");
            } else {
                eprintln!("[factbot] bootstrap failed: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
