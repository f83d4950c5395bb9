pub const ARCHETYPES_YAML: &str = r#"
archetypes:
  - arch_id: courier
    mechanism_id: salary
    base_title: Курьер
    base_desc: Доставка посылок по городу.
    base_classifiers:
      sell: [time]
      to_whom: [single_client, platform]
      measure: [rate, price]
    base_matrix_cells: [A1]
    default_bridges: [b_time_to_skill]
    default_routes: [r_start_simple]
    risk_level: medium
    role_family: LOGISTICS
    kind: service
    activity: active
    scalability: linear
    outside_market: false
  - arch_id: courier_copy
    mechanism_id: salary
    base_title: Курьер
    base_desc: Доставка посылок по городу.
    base_classifiers:
      sell: [time]
      to_whom: [single_client, platform]
      measure: [rate, price]
    base_matrix_cells: [A1]
    default_bridges: [b_time_to_skill]
    default_routes: [r_start_simple]
    risk_level: medium
    role_family: LOGISTICS
    kind: service
    activity: active
    scalability: linear
    outside_market: false
  - arch_id: copywriter
    mechanism_id: fee_for_result
    base_title: Копирайтер
    base_desc: Тексты под заказ.
    base_classifiers:
      sell: [skill, result, time, expertise]
      to_whom: [single_client]
      measure: [price, percent]
    base_matrix_cells: [P3, A2, A4, P1]
    default_bridges: [b1, b2, b3, b4, b5, b6, b7]
    default_routes: [r1, r2]
    risk_level: low
    role_family: CONTENT
    kind: service
    activity: active
    scalability: linear
    outside_market: false
  - arch_id: reseller
    mechanism_id: entrepreneurship_margin
    base_title: Перепродажа товаров
    base_desc: Закупка и перепродажа.
    base_classifiers:
      sell: [product]
      to_whom: [market]
      measure: [price]
    base_matrix_cells: [P2]
    default_bridges: []
    default_routes: []
    risk_level: high
    role_family: SALES
    kind: business
    activity: active
    scalability: scalable
    outside_market: false
"#;

pub const MODIFIERS_YAML: &str = r#"
modifiers:
  - id: direct_client
    category: channel
    changes:
      title_suffix: " напрямую"
      to_whom_add: [single_client]
  - id: freelance_platform
    category: channel
    changes:
      title_suffix: " через платформу"
      desc_suffix: Заказы через площадку.
      to_whom_add: [platform]
      sell_add: [skill]
      bridges_add: [b8, b9]
  - id: marketplace
    category: channel
    changes:
      title_suffix: " на маркетплейсе"
      to_whom_add: [market, many_people]
      matrix_add: [P4]
  - id: bundle
    category: packaging
    changes:
      title_suffix: " пакетом"
      sell_add: [product]
      matrix_add: [P1]
  - id: subscription
    category: packaging
    changes:
      title_suffix: " по подписке"
      measure_add: [rent]
      matrix_add: [P2]
      routes_add: [r3, r4]
  - id: automation
    category: packaging
    changes:
      title_suffix: " с автоматизацией"
      matrix_add: [A3]
  - id: leverage
    category: risk
    changes:
      title_suffix: " с заёмными средствами"
      matrix_add: [A4]
  - id: grant_only
    category: packaging
    applies_to:
      mechanisms: [grants_prizes]
    changes:
      title_suffix: " по гранту"
"#;

pub const VARIANTS_YAML: &str = r#"
variants:
  - id: v_courier
    title: Kurier mit eigenem Fahrrad
    primary_way_id: salary
    matrix_cells: [A1]
    notes: Lieferung von Paketen
    hints_fit: [outdoor]
  - id: v_admin_kept
    title: Kurier
    primary_way_id: salary
    matrix_cells: [A1, P2]
    activity_profile:
      role_family: ADMIN
  - id: v_design
    title: Grafikdesign für kleine Unternehmen
    primary_way_id: fee_for_result
    matrix_cells: [P2]
    keywords: [online, logo]
  - id: a_first
    title: Nebenjob
    primary_way_id: salary
    profile_id: manual_profile
"#;

pub const AUTO_TAGGING_YAML: &str = r#"
auto_tagging:
  profile_keywords:
    delivery: [kurier, lieferung, paket]
    creative: [design, logo]
  subprofile_keywords:
    delivery.bike: [fahrrad]
    creative.graphics: [grafik]
  work_format_keywords:
    remote: [online]
    outdoor: [fahrrad, draussen]
  entry_level_keywords:
    no_experience: [ohne erfahrung]
"#;

pub const ACTIVITY_PROFILES_YAML: &str = r#"
activity_profiles:
  - id: delivery
    title: Доставка
  - id: creative
    title: Творчество
    tags: [grafik]
"#;

pub const ACTIVITY_SUBPROFILES_YAML: &str = r#"
activity_subprofiles:
  - id: delivery.bike
    parent_profile_id: delivery
  - id: creative.graphics
    parent_profile_id: creative
"#;

pub const MATRIX_TABLES: [(&str, &str); 7] = [
    (
        "axes.yaml",
        r#"
axes:
  - id: activity
    values: [active, passive]
  - id: scalability
    values: [linear, scalable]
  - id: risk
    values: [low, medium, high]
"#,
    ),
    (
        "cells.yaml",
        r#"
cells:
  - {id: A1, activity: active, scalability: linear, risk: low, label: Работа на время}
  - {id: A2, activity: active, scalability: linear, risk: medium}
  - {id: A3, activity: active, scalability: scalable, risk: medium}
  - {id: A4, activity: active, scalability: scalable, risk: high}
  - {id: P1, activity: passive, scalability: linear, risk: low}
  - {id: P2, activity: passive, scalability: linear, risk: medium}
  - {id: P3, activity: passive, scalability: scalable, risk: medium}
  - {id: P4, activity: passive, scalability: scalable, risk: high}
"#,
    ),
    (
        "taxonomy.yaml",
        r#"
taxonomy:
  - id: salary
    name: Зарплата
    sell: [time]
    to_whom: [single_client]
    value: [rate]
    typical_cells: [A1]
  - id: fee_for_result
    name: Оплата за результат
    sell: [result]
    to_whom: [single_client, platform]
    value: [price, percent]
    typical_cells: [A2, P3]
"#,
    ),
    (
        "mappings.yaml",
        r#"
sell_items:
  time: {label: Время, typical_cells: [A1]}
  result: {label: Результат, typical_cells: [A2]}
to_whom_items:
  single_client: {label: Один клиент}
  platform: {label: Платформа}
value_measures:
  rate: {label: Ставка, typical_cells: [A1]}
  price: {label: Цена}
  percent: {label: Процент, typical_cells: [P3]}
"#,
    ),
    (
        "paths.yaml",
        r#"
paths:
  - id: r1
    name: От найма к результату
    sequence: [A1, A2]
"#,
    ),
    (
        "bridges.yaml",
        r#"
bridges:
  - id: b1
    from: A1
    to: A2
    name: Навык
"#,
    ),
    (
        "keywords.yaml",
        r#"
keywords:
  tags:
    sell:
      result: [результат]
    to_whom:
      platform: [платформ]
    value:
      percent: [процент]
  taxonomy_hints:
    salary: [оклад]
"#,
    ),
];

pub const CONSISTENT_VARIANTS_YAML: &str = r#"
variants:
  - id: v_courier
    title: Курьер
    primary_way_id: salary
    matrix_cells: [A1]
    sell_tags: [time]
    to_whom_tags: [single_client]
    value_tags: [rate]
    risk_level: low
    activity: active
    scalability: linear
  - id: v_design
    title: Дизайн под заказ
    primary_way_id: fee_for_result
    matrix_cells: [A2, P3]
    sell_tags: [result]
    to_whom_tags: [platform]
    value_tags: [percent]
    risk_level: medium
    activity: active
    scalability: scalable
"#;
