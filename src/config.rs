/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- 试卷服务配置 ---
    pub paper_api_base_url: String,
    // --- 作答/交卷服务配置 ---
    pub attempt_api_base_url: String,
    /// 接口鉴权 token
    pub exam_token: String,
    /// 服务端未返回时长时使用的默认考试时长（分钟）
    pub default_duration_minutes: u64,
    /// 倒计时刷新间隔（秒）
    pub tick_interval_secs: u64,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 试卷加载最大重试次数
    pub load_retries: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 结果页地址前缀
    pub results_url_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paper_api_base_url: "https://tps-exam-api.staff.xdf.cn".to_string(),
            attempt_api_base_url: "https://tps-exam-api.staff.xdf.cn".to_string(),
            exam_token: "8A41C6E07D2390FBD157A2243E95B0C1".to_string(),
            default_duration_minutes: 150,
            tick_interval_secs: 1,
            request_timeout_secs: 30,
            load_retries: 3,
            verbose_logging: false,
            results_url_base: "https://stu-exam.xdf.cn/#/examResult".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            paper_api_base_url: std::env::var("PAPER_API_BASE_URL").unwrap_or(default.paper_api_base_url),
            attempt_api_base_url: std::env::var("ATTEMPT_API_BASE_URL").unwrap_or(default.attempt_api_base_url),
            exam_token: std::env::var("EXAM_TOKEN").unwrap_or(default.exam_token),
            default_duration_minutes: std::env::var("DEFAULT_DURATION_MINUTES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_duration_minutes),
            tick_interval_secs: std::env::var("TICK_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.tick_interval_secs),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            load_retries: std::env::var("LOAD_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.load_retries),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            results_url_base: std::env::var("RESULTS_URL_BASE").unwrap_or(default.results_url_base),
        }
    }
}
