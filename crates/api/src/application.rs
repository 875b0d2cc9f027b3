// 引入标准库：
// `TcpListener`: 预先绑定的监听套接字，测试中可以绑定到 0 端口。
// `Arc`: 原子引用计数，用于在路由与投递任务之间共享 bot 客户端。
use std::{net::TcpListener, sync::Arc};

// 引入 actix-web 框架组件。
use actix_web::{middleware::Logger, web, App, HttpServer};

// 引入领域层配置和遥测。
use factbot_domain::config::{BotConfig, ConfigError, UpdateDelivery};
use factbot_domain::services::telemetry::{
    init_metrics, init_tracing, TelemetryConfig, TelemetryError,
};
// 引入 Telegram 适配层。
use factbot_telegram::{BotClient, BotError, TelegramClient};
use metrics::counter;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use crate::{handlers::configure_routes, state::AppState};

// 应用程序启动入口函数。
pub async fn run() -> Result<(), BootstrapError> {
    // 1. 初始化日志，保证配置错误能够被记录。
    let telemetry_config = TelemetryConfig::from_env("FACTBOT");
    init_tracing(&telemetry_config)?;

    // 2. 加载配置。缺少必需变量时在此直接返回，不绑定任何端口。
    let config = BotConfig::load_from_env()?;

    // 3. 初始化指标（可能会绑定 Prometheus 监听端口）。
    init_metrics(&telemetry_config)?;

    // 4. 创建 bot 客户端。
    let bot: Arc<dyn BotClient> = Arc::new(TelegramClient::new(config.telegram_token()));

    // 5. 绑定 HTTP 端口并运行。
    let listener = TcpListener::bind(config.bind_address())?;
    serve(&config, bot, listener).await
}

/// Serves HTTP on `listener` and drives update delivery for the configured
/// mode until either side stops.
pub async fn serve(
    config: &BotConfig,
    bot: Arc<dyn BotClient>,
    listener: TcpListener,
) -> Result<(), BootstrapError> {
    let mode = config.mode();
    let port = listener.local_addr()?.port();
    let state = AppState::new(bot.clone());

    // 健康检查会被外部监控频繁调用，不写访问日志。
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default().exclude("/"))
            .configure(|cfg| configure_routes(cfg, mode))
    })
    .listen(listener)?
    .run();
    let handle = server.handle();
    info!(port, mode = mode.as_ref(), "server is running on port {port}");

    // 模式在启动时确定一次，之后不再改变。
    let delivery = deliver_updates(bot, config.delivery().clone());

    tokio::pin!(server);
    tokio::pin!(delivery);

    tokio::select! {
        result = &mut server => {
            result?;
            info!("server stopped");
            Ok(())
        }
        result = &mut delivery => {
            // 投递结束（无论成功或失败）都优雅地关闭 HTTP 服务器。
            // `stop` 需要服务器 future 继续被轮询才会完成，因此两者一起驱动。
            let ((), stopped) = tokio::join!(handle.stop(true), &mut server);
            stopped?;
            if result.is_ok() {
                warn!(mode = mode.as_ref(), "update delivery ended, server stopped");
            }
            result
        }
    }
}

async fn deliver_updates(
    bot: Arc<dyn BotClient>,
    delivery: UpdateDelivery,
) -> Result<(), BootstrapError> {
    match delivery {
        UpdateDelivery::Webhook { endpoint } => {
            // 注册 webhook 与分发器并发运行；注册失败立即终止。
            tokio::try_join!(
                async { bot.dispatch_webhook_updates().await.map_err(BootstrapError::from) },
                register_webhook(bot.as_ref(), &endpoint),
            )?;
            Ok(())
        }
        UpdateDelivery::LongPolling => {
            bot.dispatch_long_polling().await?;
            Ok(())
        }
    }
}

/// Registers the callback URL once. Failure is fatal for the process.
async fn register_webhook(bot: &dyn BotClient, endpoint: &Url) -> Result<(), BootstrapError> {
    match bot.register_webhook(endpoint).await {
        Ok(()) => {
            counter!("factbot_webhook_registrations_total", "result" => "ok").increment(1);
            info!("webhook set to {endpoint}");
            Ok(())
        }
        Err(source) => {
            counter!("factbot_webhook_registrations_total", "result" => "error").increment(1);
            error!(%endpoint, error = %source, "failed to register webhook");
            Err(BootstrapError::WebhookRegistration {
                endpoint: endpoint.to_string(),
                source,
            })
        }
    }
}

// 定义启动过程中的错误枚举。
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("bot error: {0}")]
    Bot(#[from] BotError),
    #[error("failed to register webhook `{endpoint}`: {source}")]
    WebhookRegistration {
        endpoint: String,
        #[source]
        source: BotError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
