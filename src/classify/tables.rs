//! Built-in keyword tables. Order inside each first-match table is the
//! priority order; the reasons table is evaluated as a union.

use super::categories::{Function, Industry, ReasonCode, Region};

/// Specific functions outrank the generic relocation verbs, so "产线搬迁"
/// is a line relocation rather than a plain relocation.
pub const FUNCTION_KEYWORDS: &[(Function, &[&str])] = &[
    (Function::HeadquartersMove, &["总部"]),
    (Function::RdMove, &["研发中心", "研发基地", "研发"]),
    (Function::OperationsCenterMove, &["运营中心", "结算中心"]),
    (
        Function::RelocationLine,
        &["产线", "生产线", "生产基地", "制造基地", "产能转移"],
    ),
    (
        Function::Relocation,
        &["搬迁", "迁建", "迁移", "迁出", "腾退", "外迁", "迁址", "迁往"],
    ),
];

/// (canonical name, extra aliases). Cities come before provinces so the more
/// precise name wins. The origin city is deliberately absent.
const DOMESTIC_PLACES: &[(&str, &[&str])] = &[
    ("深汕特别合作区", &["深汕"]),
    ("东莞", &[]),
    ("惠州", &[]),
    ("江门", &[]),
    ("河源", &[]),
    ("汕尾", &[]),
    ("清远", &[]),
    ("肇庆", &[]),
    ("佛山", &[]),
    ("广州", &[]),
    ("珠海", &[]),
    ("韶关", &[]),
    ("赣州", &[]),
    ("长沙", &[]),
    ("武汉", &[]),
    ("成都", &[]),
    ("重庆", &[]),
    ("西安", &[]),
    ("合肥", &[]),
    ("苏州", &[]),
    ("无锡", &[]),
    ("南京", &[]),
    ("杭州", &[]),
    ("上海", &[]),
    ("天津", &[]),
    ("北京", &[]),
    ("郑州", &[]),
    ("南昌", &[]),
    ("厦门", &[]),
    // Also appears inside 中山大学, 中山路 and 中山公园, so it is tried after
    // every other city.
    ("中山", &[]),
    ("江西", &[]),
    ("湖南", &[]),
    ("湖北", &[]),
    ("广西", &[]),
    ("四川", &[]),
    ("安徽", &[]),
    ("江苏", &[]),
    ("浙江", &[]),
    ("河南", &[]),
];

const SOUTHEAST_ASIA_PLACES: &[(&str, &[&str])] = &[
    ("越南", &[]),
    ("泰国", &[]),
    ("马来西亚", &[]),
    ("印度尼西亚", &["印尼"]),
    ("新加坡", &[]),
    ("菲律宾", &[]),
    ("柬埔寨", &[]),
    ("缅甸", &[]),
    ("老挝", &[]),
];

const WESTERN_PLACES: &[(&str, &[&str])] = &[
    ("美国", &[]),
    ("墨西哥", &[]),
    ("加拿大", &[]),
    ("德国", &[]),
    ("匈牙利", &[]),
    ("波兰", &[]),
    ("塞尔维亚", &[]),
    ("法国", &[]),
    ("英国", &[]),
    ("荷兰", &[]),
    ("意大利", &[]),
    ("西班牙", &[]),
];

/// Gazetteers in region priority order.
pub const GAZETTEERS: &[(Region, &[(&str, &[&str])])] = &[
    (Region::Domestic, DOMESTIC_PLACES),
    (Region::SoutheastAsia, SOUTHEAST_ASIA_PLACES),
    (Region::Western, WESTERN_PLACES),
];

/// Platform terms sit ahead of electronics because "电子商务" contains "电子".
pub const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::PlatformEconomy,
        &["电子商务", "电商", "直播", "网络平台", "平台经济"],
    ),
    (
        Industry::ElectronicsInfo,
        &[
            "芯片", "半导体", "集成电路", "消费电子", "电子", "显示", "通信", "光电",
            "电路板", "PCB",
        ],
    ),
    (
        Industry::NewEnergy,
        &["新能源", "锂电", "电池", "光伏", "储能", "充电", "氢能"],
    ),
    (
        Industry::BiomedMedicalDevice,
        &["医药", "药业", "制药", "生物", "医疗", "器械", "疫苗", "诊断"],
    ),
    (
        Industry::EquipmentManufacturing,
        &["装备", "机械", "设备", "机器人", "数控", "自动化", "零部件", "汽车"],
    ),
    (
        Industry::Materials,
        &["材料", "化工", "钢铁", "有色金属", "塑料", "涂料", "玻璃"],
    ),
    (
        Industry::LogisticsSupplyChain,
        &["物流", "供应链", "仓储", "快递", "港口", "货运"],
    ),
    (
        Industry::InfoServices,
        &["软件", "信息技术", "信息服务", "数据", "云计算", "人工智能", "互联网"],
    ),
    (
        Industry::FinanceProfessionalServices,
        &["金融", "银行", "证券", "保险", "基金", "咨询", "会计", "律师"],
    ),
    (
        Industry::OtherServices,
        &["服务", "餐饮", "零售", "酒店", "文化", "教育", "旅游"],
    ),
];

pub const REASON_KEYWORDS: &[(ReasonCode, &[&str])] = &[
    (ReasonCode::Cost, &["成本", "降本", "租金", "人工费用", "费用上涨"]),
    (
        ReasonCode::LandSpace,
        &["腾退", "征收", "城市更新", "整备", "用地", "土地", "场地", "厂房", "空间"],
    ),
    (
        ReasonCode::Environmental,
        &["环保", "环评", "排放", "污染", "整治", "生态"],
    ),
    (ReasonCode::SupplyChain, &["供应链", "配套", "产业链", "上下游"]),
    (ReasonCode::MarketProximity, &["市场", "客户", "贴近", "辐射"]),
    (ReasonCode::Talent, &["人才", "招工", "用工", "劳动力"]),
    (
        ReasonCode::PolicyIncentive,
        &["补偿", "补助", "补贴", "激励", "招商", "优惠", "扶持"],
    ),
    (
        ReasonCode::FinancingTax,
        &["税收", "减税", "税率", "融资", "募投", "募集资金"],
    ),
    (
        ReasonCode::InternationalEnvironment,
        &["关税", "贸易摩擦", "贸易战", "制裁", "出口管制", "海外", "国际"],
    ),
    (
        ReasonCode::StrategicAdjustment,
        &["战略", "布局", "整合", "转型", "调整"],
    ),
];
