//! Built-in content: mission ladders, badge definitions, practice question
//! banks, and leaderboard showcase data.
//!
//! Guarantees the app is playable without external config. A TOML config
//! (see `config.rs`) can replace mission ladders and extend practice pools.

use std::collections::HashMap;

use crate::domain::{
  Badge, BadgeTier, Difficulty, Language, LeaderboardEntry, Mission, MissionKind, PracticeQuestion,
};

#[allow(dead_code)]
pub const TRACK_LEN: usize = 10;

fn quiz(
  id: &str,
  order: u32,
  xp: u32,
  difficulty: Difficulty,
  title: &str,
  description: &str,
  task: &str,
  options: &[&str],
  correct: usize,
) -> Mission {
  Mission {
    id: id.into(),
    title: title.into(),
    description: description.into(),
    task: task.into(),
    kind: MissionKind::Quiz,
    difficulty,
    xp_reward: xp,
    unlocked: order == 1,
    completed: false,
    order,
    options: Some(options.iter().map(|s| s.to_string()).collect()),
    correct_option: Some(correct),
  }
}

fn code(
  id: &str,
  order: u32,
  xp: u32,
  difficulty: Difficulty,
  title: &str,
  description: &str,
  task: &str,
) -> Mission {
  Mission {
    id: id.into(),
    title: title.into(),
    description: description.into(),
    task: task.into(),
    kind: MissionKind::Code,
    difficulty,
    xp_reward: xp,
    unlocked: order == 1,
    completed: false,
    order,
    options: None,
    correct_option: None,
  }
}

/// The built-in mission ladders. Quizzes open each track, code labs close it;
/// per-track rewards total 5400 XP so the gold rank stays reachable.
pub fn mission_catalog() -> HashMap<Language, Vec<Mission>> {
  let python = vec![
    quiz(
      "py_m1", 1, 300, Difficulty::Easy,
      "Lệnh in ra màn hình",
      "Làm quen với lệnh xuất dữ liệu đầu tiên của Python.",
      "Lệnh nào dùng để in ra màn hình trong Python?",
      &["print()", "echo()", "printf()", "console.log()"], 0,
    ),
    quiz(
      "py_m2", 2, 350, Difficulty::Easy,
      "Biến và kiểu dữ liệu",
      "Phân biệt các kiểu dữ liệu cơ bản.",
      "Kết quả của `type(5)` là gì?",
      &["<class 'str'>", "<class 'int'>", "<class 'float'>", "<class 'bool'>"], 1,
    ),
    quiz(
      "py_m3", 3, 400, Difficulty::Medium,
      "Vòng lặp for",
      "Đọc hiểu vòng lặp và hàm range.",
      "Đoạn `for i in range(3): print(i)` in ra những số nào?",
      &["1 2 3", "0 1 2 3", "0 1 2", "3 2 1"], 2,
    ),
    quiz(
      "py_m4", 4, 450, Difficulty::Medium,
      "Danh sách",
      "Thao tác với list và hàm len.",
      "Biểu thức `len([1, 2, 3])` trả về giá trị nào?",
      &["2", "3", "4", "Lỗi cú pháp"], 1,
    ),
    quiz(
      "py_m5", 5, 500, Difficulty::Medium,
      "Câu điều kiện",
      "Rẽ nhánh chương trình theo điều kiện.",
      "Từ khóa nào bắt đầu một khối điều kiện trong Python?",
      &["when", "case", "cond", "if"], 3,
    ),
    code(
      "py_m6", 6, 550, Difficulty::Medium,
      "Xin chào Nexus",
      "Bài thực hành code đầu tiên của bạn.",
      "Viết chương trình in ra màn hình dòng chữ: Xin chào Nexus!",
    ),
    code(
      "py_m7", 7, 600, Difficulty::Medium,
      "Máy tính mini",
      "Định nghĩa hàm đầu tiên.",
      "Viết hàm tinh_tong(a, b) trả về tổng của hai số a và b.",
    ),
    code(
      "py_m8", 8, 650, Difficulty::Hard,
      "Bộ lọc số chẵn",
      "Kết hợp vòng lặp và điều kiện.",
      "Dùng vòng lặp for để in ra tất cả các số chẵn từ 0 đến 20.",
    ),
    code(
      "py_m9", 9, 750, Difficulty::Hard,
      "Đếm nguyên âm",
      "Xử lý chuỗi ký tự.",
      "Viết hàm dem_nguyen_am(s) đếm số nguyên âm (a, e, i, o, u) trong chuỗi s.",
    ),
    code(
      "py_m10", 10, 850, Difficulty::Hard,
      "Thử thách FizzBuzz",
      "Nhiệm vụ cuối cùng của hành trình Python.",
      "In các số từ 1 đến 30; số chia hết cho 3 in 'Fizz', chia hết cho 5 in 'Buzz', chia hết cho cả hai in 'FizzBuzz'.",
    ),
  ];

  let html = vec![
    quiz(
      "ht_m1", 1, 300, Difficulty::Easy,
      "HTML là gì?",
      "Khởi đầu với ngôn ngữ đánh dấu của web.",
      "HTML là viết tắt của cụm từ nào?",
      &[
        "HyperText Markup Language",
        "HighTech Modern Language",
        "HyperTransfer Markup Language",
        "HomeTool Markup Language",
      ], 0,
    ),
    quiz(
      "ht_m2", 2, 350, Difficulty::Easy,
      "Thẻ tiêu đề",
      "Cấp bậc tiêu đề trong tài liệu.",
      "Thẻ nào tạo tiêu đề lớn nhất trong HTML?",
      &["<h6>", "<head>", "<h1>", "<title>"], 2,
    ),
    quiz(
      "ht_m3", 3, 400, Difficulty::Medium,
      "Liên kết",
      "Kết nối các trang với nhau.",
      "Thẻ nào dùng để tạo một liên kết đến trang khác?",
      &["<link>", "<a>", "<href>", "<url>"], 1,
    ),
    quiz(
      "ht_m4", 4, 450, Difficulty::Medium,
      "Hình ảnh",
      "Chèn hình ảnh vào trang web.",
      "Thuộc tính nào của thẻ <img> chứa đường dẫn tới ảnh?",
      &["href", "link", "alt", "src"], 3,
    ),
    quiz(
      "ht_m5", 5, 500, Difficulty::Medium,
      "Danh sách",
      "Các kiểu danh sách trong HTML.",
      "Thẻ nào tạo một danh sách không có thứ tự?",
      &["<ol>", "<ul>", "<li>", "<list>"], 1,
    ),
    code(
      "ht_m6", 6, 550, Difficulty::Medium,
      "Trang web đầu tiên",
      "Dựng khung trang HTML hoàn chỉnh.",
      "Viết một trang HTML có thẻ <h1> hiển thị dòng chữ: Xin chào Nexus!",
    ),
    code(
      "ht_m7", 7, 600, Difficulty::Medium,
      "Thực đơn quán ăn",
      "Thực hành với danh sách.",
      "Tạo một danh sách <ul> gồm 3 món ăn yêu thích của bạn.",
    ),
    code(
      "ht_m8", 8, 650, Difficulty::Hard,
      "Bảng điểm",
      "Trình bày dữ liệu dạng bảng.",
      "Tạo một bảng <table> 2 hàng 2 cột gồm tên môn học và điểm số.",
    ),
    code(
      "ht_m9", 9, 750, Difficulty::Hard,
      "Biểu mẫu liên hệ",
      "Thu thập dữ liệu từ người dùng.",
      "Tạo một <form> có ô nhập họ tên và một nút gửi.",
    ),
    code(
      "ht_m10", 10, 850, Difficulty::Hard,
      "Trang hồ sơ cá nhân",
      "Nhiệm vụ cuối cùng của hành trình HTML.",
      "Dựng một trang hồ sơ dùng các thẻ ngữ nghĩa <header>, <main>, <footer> giới thiệu bản thân bạn.",
    ),
  ];

  HashMap::from([(Language::Python, python), (Language::Html, html)])
}

/// Milestone badge for the first mission ever completed.
pub fn first_step_badge() -> Badge {
  Badge {
    id: "first_step".into(),
    name: "Bước Chân Đầu Tiên".into(),
    icon: "🚀".into(),
    description: "Hoàn thành nhiệm vụ đầu tiên trong hành trình Nexus.".into(),
    tier: BadgeTier::None,
  }
}

/// Rank badge shown on the result screen for journeys ending at 5000+ XP.
pub fn gold_rank_badge() -> Badge {
  Badge {
    id: "rank_gold".into(),
    name: "Vô Địch Nexus".into(),
    icon: "👑".into(),
    description: "Chinh phục hành trình với hơn 5000 XP tích lũy.".into(),
    tier: BadgeTier::Gold,
  }
}

/// Rank badge for journeys ending between 3000 and 5000 XP.
pub fn silver_rank_badge() -> Badge {
  Badge {
    id: "rank_silver".into(),
    name: "Chiến Binh Bền Bỉ".into(),
    icon: "🌟".into(),
    description: "Hoàn thành hành trình với hơn 3000 XP tích lũy.".into(),
    tier: BadgeTier::Silver,
  }
}

/// Static showcase rows for the leaderboard screen.
pub fn leaderboard_seed() -> Vec<LeaderboardEntry> {
  let row = |name: &str, level: u32, xp: u32, seed: &str| LeaderboardEntry {
    name: name.into(),
    level,
    xp,
    avatar_seed: seed.into(),
  };
  vec![
    row("Hoàng Long", 15, 14500, "Hoàng"),
    row("Minh Thư", 14, 13200, "Minh"),
    row("Thanh Sơn", 12, 11800, "Thanh"),
    row("Bảo Trâm", 10, 9500, "Bảo"),
    row("Quốc Anh", 9, 8700, "Quốc"),
  ]
}

fn q(id: &str, question: &str, options: &[&str], correct: usize) -> PracticeQuestion {
  PracticeQuestion {
    id: id.into(),
    question: question.into(),
    options: options.iter().map(|s| s.to_string()).collect(),
    correct_option: correct,
  }
}

/// Built-in practice pools: 20 questions per (language, level 1..=5).
pub fn practice_bank() -> HashMap<(Language, u8), Vec<PracticeQuestion>> {
  HashMap::from([
    ((Language::Python, 1), python_level_1()),
    ((Language::Python, 2), python_level_2()),
    ((Language::Python, 3), python_level_3()),
    ((Language::Python, 4), python_level_4()),
    ((Language::Python, 5), python_level_5()),
    ((Language::Html, 1), html_level_1()),
    ((Language::Html, 2), html_level_2()),
    ((Language::Html, 3), html_level_3()),
    ((Language::Html, 4), html_level_4()),
    ((Language::Html, 5), html_level_5()),
  ])
}

// Level 1: cú pháp và khái niệm nền tảng.
fn python_level_1() -> Vec<PracticeQuestion> {
  vec![
    q("py1_01", "Kết quả của `print(1 + 2)` là gì?", &["3", "12", "1 + 2", "Lỗi"], 0),
    q("py1_02", "Dòng chú thích trong Python bắt đầu bằng ký tự nào?", &["//", "#", "/*", "--"], 1),
    q("py1_03", "Cách khai báo biến nào hợp lệ?", &["int x = 5", "x := 5", "x = 5", "var x = 5"], 2),
    q("py1_04", "Hàm nào đọc dữ liệu người dùng nhập từ bàn phím?", &["read()", "scan()", "get()", "input()"], 3),
    q("py1_05", "`type('Nexus')` trả về kiểu nào?", &["str", "char", "text", "string[]"], 0),
    q("py1_06", "Kết quả của `10 // 3` là gì?", &["3.33", "3", "1", "4"], 1),
    q("py1_07", "Kết quả của `10 % 3` là gì?", &["3", "0", "1", "10"], 2),
    q("py1_08", "Toán tử nào dùng để lũy thừa?", &["^", "pow", "e", "**"], 3),
    q("py1_09", "Giá trị nào là kiểu bool?", &["True", "'true'", "1.0", "\"False\""], 0),
    q("py1_10", "Tên biến nào KHÔNG hợp lệ?", &["diem_so", "2diem", "_diem", "diemSo"], 1),
    q("py1_11", "Hàm nào chuyển chuỗi '5' thành số nguyên?", &["str(5)", "number('5')", "int('5')", "float('5')"], 2),
    q("py1_12", "Kết quả của `print('a', 'b')` là gì?", &["ab", "a,b", "a  b", "a b"], 3),
    q("py1_13", "Phần mở rộng của tệp Python là gì?", &[".py", ".pt", ".pyt", ".python"], 0),
    q("py1_14", "Kết quả của `3 * '2'` là gì?", &["6", "'222'", "'6'", "Lỗi"], 1),
    q("py1_15", "Từ khóa nào KHÔNG thuộc Python?", &["pass", "def", "func", "None"], 2),
    q("py1_16", "Biểu thức nào so sánh bằng?", &["x = y", "x := y", "x equals y", "x == y"], 3),
    q("py1_17", "Kết quả của `bool(0)` là gì?", &["False", "True", "0", "None"], 0),
    q("py1_18", "`print(type(3.14))` in ra kiểu nào?", &["int", "float", "double", "decimal"], 1),
    q("py1_19", "Hàm nào trả về giá trị tuyệt đối?", &["total()", "mod()", "abs()", "round(-1)"], 2),
    q("py1_20", "Kết quả của `7 > 3 and 2 > 5` là gì?", &["True", "1", "None", "False"], 3),
  ]
}

// Level 2: chuỗi và danh sách.
fn python_level_2() -> Vec<PracticeQuestion> {
  vec![
    q("py2_01", "`'nexus'[0]` trả về ký tự nào?", &["'n'", "'e'", "'s'", "Lỗi"], 0),
    q("py2_02", "`len('hello')` bằng bao nhiêu?", &["4", "5", "6", "Lỗi"], 1),
    q("py2_03", "Phương thức nào viết hoa toàn bộ chuỗi?", &["toUpper()", "capital()", "upper()", "title()"], 2),
    q("py2_04", "`'a,b,c'.split(',')` trả về gì?", &["'abc'", "('a','b','c')", "{'a','b','c'}", "['a', 'b', 'c']"], 3),
    q("py2_05", "Thêm phần tử vào cuối list dùng phương thức nào?", &["append()", "push()", "add()", "insert_last()"], 0),
    q("py2_06", "`[1, 2, 3][-1]` trả về gì?", &["1", "3", "2", "Lỗi"], 1),
    q("py2_07", "`[1, 2, 3, 4][1:3]` trả về gì?", &["[1, 2]", "[2, 3, 4]", "[2, 3]", "[1, 2, 3]"], 2),
    q("py2_08", "Phương thức nào xóa và trả về phần tử cuối của list?", &["remove()", "delete()", "cut()", "pop()"], 3),
    q("py2_09", "`'ha' * 3` cho kết quả nào?", &["'hahaha'", "'ha3'", "6", "Lỗi"], 0),
    q("py2_10", "Nối hai list `[1] + [2]` được gì?", &["[3]", "[1, 2]", "[[1], [2]]", "Lỗi"], 1),
    q("py2_11", "`'Python'.lower()` trả về gì?", &["'PYTHON'", "'Python'", "'python'", "Lỗi"], 2),
    q("py2_12", "Kiểm tra 'a' có trong list dùng từ khóa nào?", &["has", "contains", "exists", "in"], 3),
    q("py2_13", "`sorted([3, 1, 2])` trả về gì?", &["[1, 2, 3]", "[3, 2, 1]", "[3, 1, 2]", "None"], 0),
    q("py2_14", "Chuỗi định dạng nào chèn biến x đúng cách?", &["'Điểm: {x}'", "f'Điểm: {x}'", "'Điểm: %x'", "f'Điểm: x'"], 1),
    q("py2_15", "`'  hi  '.strip()` trả về gì?", &["'  hi'", "'hi  '", "'hi'", "' h i '"], 2),
    q("py2_16", "`list(range(2, 5))` là gì?", &["[2, 3, 4, 5]", "[3, 4, 5]", "[2, 5]", "[2, 3, 4]"], 3),
    q("py2_17", "Phương thức nào tìm vị trí xuất hiện đầu tiên của chuỗi con?", &["find()", "locate()", "search()", "where()"], 0),
    q("py2_18", "`'1' + '2'` cho kết quả nào?", &["3", "'12'", "'3'", "Lỗi"], 1),
    q("py2_19", "`max([4, 9, 2])` bằng bao nhiêu?", &["4", "2", "9", "15"], 2),
    q("py2_20", "`'-'.join(['a', 'b'])` trả về gì?", &["'ab'", "['a-b']", "'a b'", "'a-b'"], 3),
  ]
}

// Level 3: điều khiển luồng và hàm.
fn python_level_3() -> Vec<PracticeQuestion> {
  vec![
    q("py3_01", "Từ khóa nào định nghĩa một hàm?", &["def", "fn", "func", "lambda def"], 0),
    q("py3_02", "Hàm không có `return` trả về giá trị nào?", &["0", "None", "''", "False"], 1),
    q("py3_03", "Từ khóa nào thoát ngay khỏi vòng lặp?", &["stop", "exit", "break", "halt"], 2),
    q("py3_04", "Từ khóa nào bỏ qua lần lặp hiện tại?", &["skip", "pass", "next", "continue"], 3),
    q("py3_05", "`while True:` tạo ra điều gì?", &["Vòng lặp vô hạn", "Lỗi cú pháp", "Lặp một lần", "Không chạy"], 0),
    q("py3_06", "Nhánh 'ngược lại nếu' viết là gì?", &["else if", "elif", "elseif", "ef"], 1),
    q("py3_07", "`range(1, 10, 2)` sinh ra dãy nào?", &["2 4 6 8", "1 2 3 ... 9", "1 3 5 7 9", "1 10 2"], 2),
    q("py3_08", "Tham số mặc định khai báo thế nào?", &["def f(x := 1)", "def f(x is 1)", "def f(int x = 1)", "def f(x=1)"], 3),
    q("py3_09", "Khối lệnh trong Python được xác định bằng gì?", &["Thụt lề", "Dấu {}", "Dấu ()", "Từ khóa end"], 0),
    q("py3_10", "Hàm `f` gọi chính nó được gọi là gì?", &["Lặp chéo", "Đệ quy", "Nội suy", "Nạp chồng"], 1),
    q("py3_11", "Đoạn `for i in range(2): print('x')` in 'x' mấy lần?", &["1", "3", "2", "0"], 2),
    q("py3_12", "Biến tạo bên trong hàm có phạm vi nào?", &["Toàn cục", "Mô-đun", "Lớp", "Cục bộ"], 3),
    q("py3_13", "`return a, b` trả về kiểu gì?", &["tuple", "list", "dict", "hai giá trị riêng"], 0),
    q("py3_14", "Từ khóa nào khai báo hàm vô danh?", &["anon", "lambda", "def_", "inline"], 1),
    q("py3_15", "`if x:` chạy khối lệnh khi nào?", &["x là None", "x bằng 0", "x là giá trị truthy", "Không bao giờ"], 2),
    q("py3_16", "Vòng lặp for duyệt được đối tượng nào?", &["Chỉ list", "Chỉ range", "Chỉ chuỗi", "Mọi iterable"], 3),
    q("py3_17", "`pass` dùng để làm gì?", &["Giữ chỗ, không làm gì", "Thoát hàm", "Bỏ qua lần lặp", "Ném lỗi"], 0),
    q("py3_18", "Gọi `f(*args)` có nghĩa là gì?", &["Nhân đối số", "Giải nén đối số từ iterable", "Trỏ tới hàm", "Lỗi cú pháp"], 1),
    q("py3_19", "Docstring đặt ở đâu?", &["Cuối hàm", "Trước def", "Ngay sau dòng def", "Trong return"], 2),
    q("py3_20", "`min(3, 1, 2)` bằng bao nhiêu?", &["3", "2", "0", "1"], 3),
  ]
}

// Level 4: cấu trúc dữ liệu và ngoại lệ.
fn python_level_4() -> Vec<PracticeQuestion> {
  vec![
    q("py4_01", "Khai báo dict nào đúng?", &["{'a': 1}", "['a': 1]", "('a': 1)", "<'a': 1>"], 0),
    q("py4_02", "`d.get('x', 0)` trả về gì khi 'x' không tồn tại?", &["None", "0", "Lỗi KeyError", "''"], 1),
    q("py4_03", "Kiểu nào KHÔNG thay đổi được (immutable)?", &["list", "dict", "tuple", "set"], 2),
    q("py4_04", "`set([1, 1, 2])` cho kết quả nào?", &["[1, 1, 2]", "(1, 2)", "{1, 1, 2}", "{1, 2}"], 3),
    q("py4_05", "`[x * 2 for x in [1, 2]]` là gì?", &["[2, 4]", "[1, 2, 1, 2]", "[1, 4]", "Lỗi"], 0),
    q("py4_06", "Bắt ngoại lệ dùng cặp từ khóa nào?", &["catch/throw", "try/except", "try/catch", "do/rescue"], 1),
    q("py4_07", "`d.keys()` của dict trả về gì?", &["Các giá trị", "Các cặp", "Các khóa", "Độ dài"], 2),
    q("py4_08", "Truy cập khóa không tồn tại bằng `d['x']` gây lỗi nào?", &["IndexError", "ValueError", "TypeError", "KeyError"], 3),
    q("py4_09", "`tuple` khác `list` ở điểm nào?", &["Không thay đổi được", "Không có thứ tự", "Không lặp được", "Chỉ chứa số"], 0),
    q("py4_10", "`{k: v for k, v in [('a', 1)]}` tạo ra gì?", &["list", "dict", "set", "tuple"], 1),
    q("py4_11", "Khối nào luôn chạy sau try/except?", &["ensure", "always", "finally", "done"], 2),
    q("py4_12", "`len({'a': 1, 'b': 2})` bằng bao nhiêu?", &["4", "1", "3", "2"], 3),
    q("py4_13", "Toán tử nào hợp hai set?", &["|", "+", "&", "^"], 0),
    q("py4_14", "`raise ValueError('x')` làm gì?", &["In cảnh báo", "Ném một ngoại lệ", "Thoát chương trình", "Trả về lỗi"], 1),
    q("py4_15", "`sorted(d)` với d là dict sắp xếp theo gì?", &["Giá trị", "Thứ tự chèn", "Khóa", "Ngẫu nhiên"], 2),
    q("py4_16", "`dict.items()` trả về các phần tử dạng nào?", &["Khóa", "Giá trị", "Chuỗi", "Cặp (khóa, giá trị)"], 3),
    q("py4_17", "`[1, 2][5]` gây lỗi nào?", &["IndexError", "KeyError", "RangeError", "Không lỗi"], 0),
    q("py4_18", "Sao chép nông một list dùng cách nào?", &["copy.deep(l)", "l[:]", "l.clone()", "list.of(l)"], 1),
    q("py4_19", "`'b' in {'a': 1}` kiểm tra điều gì?", &["Giá trị", "Cặp", "Khóa", "Độ dài"], 2),
    q("py4_20", "`zip([1, 2], ['a', 'b'])` ghép ra gì?", &["[1, 2, 'a', 'b']", "{'1': 'a'}", "[[1, 'a'], [2, 'b']] dạng list", "Các cặp (1, 'a'), (2, 'b')"], 3),
  ]
}

// Level 5: OOP và chủ đề nâng cao.
fn python_level_5() -> Vec<PracticeQuestion> {
  vec![
    q("py5_01", "Từ khóa nào định nghĩa một lớp?", &["class", "struct", "object", "type"], 0),
    q("py5_02", "Phương thức khởi tạo của lớp tên là gì?", &["__new__", "__init__", "__start__", "constructor"], 1),
    q("py5_03", "Tham số đầu tiên của phương thức instance là gì?", &["this", "cls", "self", "me"], 2),
    q("py5_04", "Lớp Con kế thừa lớp Cha viết thế nào?", &["class Con extends Cha", "class Con : Cha", "class Con inherit Cha", "class Con(Cha)"], 3),
    q("py5_05", "`@staticmethod` đánh dấu điều gì?", &["Phương thức không nhận self", "Thuộc tính tĩnh", "Hàm private", "Hằng số lớp"], 0),
    q("py5_06", "`import math` rồi dùng pi thế nào?", &["pi", "math.pi", "math->pi", "math::pi"], 1),
    q("py5_07", "`enumerate(['a', 'b'])` sinh ra gì?", &["'a', 'b'", "0, 1", "Các cặp (0, 'a'), (1, 'b')", "['a', 'b']"], 2),
    q("py5_08", "Hàm chứa `yield` được gọi là gì?", &["Coroutine thuần", "Hàm lambda", "Hàm tĩnh", "Generator"], 3),
    q("py5_09", "`__str__` quyết định điều gì?", &["Chuỗi hiển thị của đối tượng", "So sánh bằng", "Độ dài", "Kiểu dữ liệu"], 0),
    q("py5_10", "Ghi đè phương thức của lớp cha gọi là gì?", &["overloading", "overriding", "shadowing", "casting"], 1),
    q("py5_11", "`with open('f') as f:` đảm bảo điều gì?", &["Đọc nhanh hơn", "Tạo tệp mới", "Tệp được đóng tự động", "Khóa tệp vĩnh viễn"], 2),
    q("py5_12", "`lambda x: x + 1` tương đương gì?", &["Biến x", "Lớp một thuộc tính", "Vòng lặp", "Hàm một tham số trả về x + 1"], 3),
    q("py5_13", "`isinstance(5, int)` trả về gì?", &["True", "False", "5", "int"], 0),
    q("py5_14", "Thuộc tính 'riêng tư' theo quy ước bắt đầu bằng gì?", &["#", "_", "$", "@"], 1),
    q("py5_15", "`super().__init__()` dùng để làm gì?", &["Tạo lớp mới", "Xóa đối tượng", "Gọi khởi tạo của lớp cha", "Sao chép self"], 2),
    q("py5_16", "`map(f, xs)` trả về gì?", &["list ngay lập tức", "dict", "Giá trị đầu tiên", "Iterator áp dụng f lên từng phần tử"], 3),
    q("py5_17", "Decorator là gì?", &["Hàm bọc và biến đổi hàm khác", "Chú thích kiểu", "Biến toàn cục", "Mẫu thiết kế UI"], 0),
    q("py5_18", "`if __name__ == '__main__':` kiểm tra điều gì?", &["Tên lớp chính", "Tệp đang được chạy trực tiếp", "Hàm main tồn tại", "Phiên bản Python"], 1),
    q("py5_19", "`try/except Exception as e` — biến e chứa gì?", &["Mã dòng lỗi", "Tên tệp", "Đối tượng ngoại lệ", "Chuỗi traceback"], 2),
    q("py5_20", "`sorted(xs, key=len)` sắp xếp theo gì?", &["Bảng chữ cái", "Giá trị số", "Ngẫu nhiên", "Độ dài từng phần tử"], 3),
  ]
}

// Level 1: cấu trúc tài liệu cơ bản.
fn html_level_1() -> Vec<PracticeQuestion> {
  vec![
    q("ht1_01", "Thẻ gốc của mọi trang HTML là gì?", &["<html>", "<root>", "<body>", "<page>"], 0),
    q("ht1_02", "Nội dung hiển thị của trang nằm trong thẻ nào?", &["<head>", "<body>", "<main>", "<view>"], 1),
    q("ht1_03", "Khai báo nào đặt ở dòng đầu tiên của tài liệu?", &["<html5>", "<doc>", "<!DOCTYPE html>", "<?html?>"], 2),
    q("ht1_04", "Tiêu đề hiển thị trên tab trình duyệt đặt trong thẻ nào?", &["<h1>", "<header>", "<name>", "<title>"], 3),
    q("ht1_05", "Thẻ nào tạo một đoạn văn?", &["<p>", "<par>", "<text>", "<pg>"], 0),
    q("ht1_06", "Thẻ nào xuống dòng mà không tạo đoạn mới?", &["<lb>", "<br>", "<nl>", "<break>"], 1),
    q("ht1_07", "Chú thích trong HTML viết thế nào?", &["// chú thích", "# chú thích", "<!-- chú thích -->", "/* chú thích */"], 2),
    q("ht1_08", "Thẻ nào KHÔNG cần thẻ đóng?", &["<p>", "<div>", "<span>", "<img>"], 3),
    q("ht1_09", "Thẻ <head> chứa gì?", &["Siêu dữ liệu của trang", "Nội dung chính", "Chân trang", "Thanh điều hướng"], 0),
    q("ht1_10", "Có bao nhiêu cấp tiêu đề h1..h6?", &["4", "6", "5", "7"], 1),
    q("ht1_11", "Thẻ nào tạo đường kẻ ngang?", &["<line>", "<border>", "<hr>", "<row>"], 2),
    q("ht1_12", "HTML mô tả điều gì của trang web?", &["Hành vi", "Kiểu dáng", "Dữ liệu máy chủ", "Cấu trúc nội dung"], 3),
    q("ht1_13", "Thẻ nào in chữ đậm có ngữ nghĩa nhấn mạnh?", &["<strong>", "<bold>", "<heavy>", "<dark>"], 0),
    q("ht1_14", "Thẻ nào in chữ nghiêng có ngữ nghĩa?", &["<italic>", "<em>", "<lean>", "<it>"], 1),
    q("ht1_15", "Phần tử HTML gồm những gì?", &["Chỉ thẻ mở", "Chỉ nội dung", "Thẻ mở, nội dung, thẻ đóng", "Thuộc tính và giá trị"], 2),
    q("ht1_16", "Tệp HTML có phần mở rộng nào?", &[".ht", ".web", ".page", ".html"], 3),
    q("ht1_17", "Thẻ <div> dùng để làm gì?", &["Nhóm nội dung dạng khối", "Tạo liên kết", "Chèn ảnh", "Tạo bảng"], 0),
    q("ht1_18", "Thẻ <span> thuộc loại phần tử nào?", &["Khối", "Nội tuyến", "Bảng", "Biểu mẫu"], 1),
    q("ht1_19", "Ngôn ngữ của trang khai báo ở thuộc tính nào?", &["language", "locale", "lang", "tongue"], 2),
    q("ht1_20", "Trình duyệt dùng gì để hiển thị HTML?", &["Trình biên dịch", "Máy ảo", "Bộ thông dịch lệnh", "Bộ dựng hình (rendering engine)"], 3),
  ]
}

// Level 2: văn bản, liên kết, ảnh, danh sách.
fn html_level_2() -> Vec<PracticeQuestion> {
  vec![
    q("ht2_01", "Thuộc tính nào chứa địa chỉ của liên kết?", &["href", "src", "link", "url"], 0),
    q("ht2_02", "Mở liên kết ở tab mới dùng thuộc tính nào?", &["tab='new'", "target='_blank'", "open='tab'", "new='true'"], 1),
    q("ht2_03", "Thuộc tính nào mô tả ảnh khi không tải được?", &["title", "desc", "alt", "label"], 2),
    q("ht2_04", "Thẻ nào tạo danh sách có thứ tự?", &["<ul>", "<dl>", "<list>", "<ol>"], 3),
    q("ht2_05", "Mỗi mục trong danh sách dùng thẻ nào?", &["<li>", "<item>", "<ul>", "<row>"], 0),
    q("ht2_06", "Liên kết tới email viết thế nào?", &["href='email:...'", "href='mailto:...'", "href='mail:...'", "href='@...'"], 1),
    q("ht2_07", "Ảnh 'logo.png' chèn bằng thẻ nào?", &["<img href='logo.png'>", "<image src='logo.png'>", "<img src='logo.png'>", "<pic src='logo.png'>"], 2),
    q("ht2_08", "Thẻ nào hiển thị đoạn code giữ nguyên định dạng?", &["<code only>", "<mono>", "<text>", "<pre>"], 3),
    q("ht2_09", "Danh sách lồng nhau tạo bằng cách nào?", &["Đặt <ul> bên trong <li>", "Dùng thuộc tính nest", "Dùng <subul>", "Không thể lồng"], 0),
    q("ht2_10", "Thẻ <blockquote> dùng cho nội dung nào?", &["Mã nguồn", "Trích dẫn dài", "Chú thích ảnh", "Tiêu đề phụ"], 1),
    q("ht2_11", "Liên kết tới một mục trong cùng trang dùng gì?", &["href='@id'", "href='/id'", "href='#id'", "href='$id'"], 2),
    q("ht2_12", "Thẻ nào đánh dấu chữ viết tắt?", &["<short>", "<acr>", "<small>", "<abbr>"], 3),
    q("ht2_13", "Thuộc tính width của <img> nhận giá trị nào?", &["Số pixel", "Chỉ phần trăm", "Chỉ em", "Chuỗi bất kỳ"], 0),
    q("ht2_14", "Thẻ <figure> thường đi kèm thẻ nào?", &["<figdesc>", "<figcaption>", "<caption>", "<label>"], 1),
    q("ht2_15", "Ký tự '<' hiển thị bằng thực thể nào?", &["&less;", "&lt", "&lt;", "&#lt"], 2),
    q("ht2_16", "Khoảng trắng không ngắt dòng là thực thể nào?", &["&space;", "&ws;", "&blank;", "&nbsp;"], 3),
    q("ht2_17", "Thẻ <mark> dùng để làm gì?", &["Tô sáng văn bản", "Gạch chân", "Đánh số trang", "Chèn ghi chú ẩn"], 0),
    q("ht2_18", "Đường dẫn tương đối 'images/a.png' tính từ đâu?", &["Thư mục gốc ổ đĩa", "Vị trí tệp HTML hiện tại", "Trang chủ website", "Thư mục Downloads"], 1),
    q("ht2_19", "Thẻ nào hiển thị chỉ số dưới (subscript)?", &["<down>", "<lower>", "<sub>", "<sup>"], 2),
    q("ht2_20", "Danh sách mô tả (description list) dùng bộ thẻ nào?", &["<ul>/<li>", "<ol>/<li>", "<table>/<tr>", "<dl>/<dt>/<dd>"], 3),
  ]
}

// Level 3: bảng và biểu mẫu.
fn html_level_3() -> Vec<PracticeQuestion> {
  vec![
    q("ht3_01", "Một hàng của bảng dùng thẻ nào?", &["<tr>", "<td>", "<th>", "<row>"], 0),
    q("ht3_02", "Một ô dữ liệu của bảng dùng thẻ nào?", &["<tr>", "<td>", "<cell>", "<col>"], 1),
    q("ht3_03", "Ô tiêu đề của bảng dùng thẻ nào?", &["<head>", "<thead only>", "<th>", "<caption>"], 2),
    q("ht3_04", "Thuộc tính nào gộp 2 cột vào một ô?", &["merge='2'", "span='2'", "cols='2'", "colspan='2'"], 3),
    q("ht3_05", "Thẻ nào bao phần thân của bảng?", &["<tbody>", "<body>", "<main>", "<tdata>"], 0),
    q("ht3_06", "Ô nhập văn bản một dòng tạo bằng gì?", &["<textline>", "<input type='text'>", "<textarea>", "<field>"], 1),
    q("ht3_07", "Ô nhập mật khẩu dùng type nào?", &["secret", "hidden", "password", "masked"], 2),
    q("ht3_08", "Nút gửi biểu mẫu tạo bằng gì?", &["<send>", "<button type='go'>", "<input type='submit-form'>", "<button type='submit'>"], 3),
    q("ht3_09", "Thuộc tính nào của <form> chỉ định nơi nhận dữ liệu?", &["action", "target", "dest", "to"], 0),
    q("ht3_10", "Hai giá trị phổ biến của thuộc tính method là gì?", &["SEND và TAKE", "GET và POST", "PUSH và PULL", "READ và WRITE"], 1),
    q("ht3_11", "Nhiều lựa chọn, chọn MỘT, dùng type nào?", &["checkbox", "select-one", "radio", "option"], 2),
    q("ht3_12", "Chọn NHIỀU mục cùng lúc dùng type nào?", &["radio", "multi", "pick", "checkbox"], 3),
    q("ht3_13", "Thẻ nào tạo vùng nhập văn bản nhiều dòng?", &["<textarea>", "<input type='multiline'>", "<bigtext>", "<area>"], 0),
    q("ht3_14", "Danh sách thả xuống tạo bằng bộ thẻ nào?", &["<list>/<item>", "<select>/<option>", "<dropdown>/<li>", "<menu>/<entry>"], 1),
    q("ht3_15", "Thẻ <label> liên kết với ô nhập qua thuộc tính nào?", &["name", "ref", "for", "bind"], 2),
    q("ht3_16", "Thuộc tính nào bắt buộc người dùng điền ô nhập?", &["must", "need", "mandatory", "required"], 3),
    q("ht3_17", "Thuộc tính placeholder làm gì?", &["Hiện chữ gợi ý mờ trong ô nhập", "Đặt giá trị mặc định", "Khóa ô nhập", "Đổi màu viền"], 0),
    q("ht3_18", "Dữ liệu form đi kèm tên trường lấy từ thuộc tính nào?", &["id", "name", "key", "field"], 1),
    q("ht3_19", "Thẻ <caption> của bảng dùng để làm gì?", &["Gộp ô", "Tạo viền", "Đặt tiêu đề cho bảng", "Sắp xếp cột"], 2),
    q("ht3_20", "Ô nhập số dùng type nào?", &["digit", "int", "numeric", "number"], 3),
  ]
}

// Level 4: thẻ ngữ nghĩa, thuộc tính, đa phương tiện.
fn html_level_4() -> Vec<PracticeQuestion> {
  vec![
    q("ht4_01", "Thẻ nào bao phần điều hướng chính của trang?", &["<nav>", "<menu>", "<links>", "<navigate>"], 0),
    q("ht4_02", "Thẻ nào chứa nội dung chính, duy nhất của trang?", &["<content>", "<main>", "<article>", "<section>"], 1),
    q("ht4_03", "Chân trang dùng thẻ ngữ nghĩa nào?", &["<bottom>", "<end>", "<footer>", "<last>"], 2),
    q("ht4_04", "Một bài viết độc lập nên bao trong thẻ nào?", &["<div>", "<post>", "<text>", "<article>"], 3),
    q("ht4_05", "Thẻ nào nhóm một vùng nội dung theo chủ đề?", &["<section>", "<group>", "<zone>", "<region>"], 0),
    q("ht4_06", "Nội dung bên lề (sidebar) dùng thẻ nào?", &["<side>", "<aside>", "<extra>", "<panel>"], 1),
    q("ht4_07", "Chèn video có thanh điều khiển viết thế nào?", &["<video auto>", "<media controls>", "<video controls>", "<play video>"], 2),
    q("ht4_08", "Thẻ <audio> cần thẻ con nào để khai báo nguồn?", &["<file>", "<track>", "<media>", "<source>"], 3),
    q("ht4_09", "Thuộc tính id khác class ở điểm nào?", &["id phải duy nhất trong trang", "id có thể trùng", "class phải duy nhất", "Không khác gì"], 0),
    q("ht4_10", "Một phần tử có thể mang bao nhiêu class?", &["1", "Nhiều, cách nhau khoảng trắng", "Tối đa 2", "Tối đa 4"], 1),
    q("ht4_11", "Thuộc tính tùy biến hợp lệ bắt đầu bằng gì?", &["x-", "custom-", "data-", "attr-"], 2),
    q("ht4_12", "Thẻ <iframe> dùng để làm gì?", &["Tạo khung viền", "Chèn ảnh động", "Tải phông chữ", "Nhúng trang khác vào trang"], 3),
    q("ht4_13", "Thuộc tính title của phần tử hiển thị khi nào?", &["Di chuột lên phần tử", "Nhấp đúp", "Tải trang", "In trang"], 0),
    q("ht4_14", "Ảnh đại diện trang khi chia sẻ khai báo qua đâu?", &["<img main>", "Thẻ <meta> trong <head>", "<picture>", "<link rel='icon'> duy nhất"], 1),
    q("ht4_15", "<header> khác <head> thế nào?", &["Không khác", "<header> nằm trong <head>", "<header> là vùng hiển thị, <head> là siêu dữ liệu", "<head> hiển thị trên cùng"], 2),
    q("ht4_16", "Thẻ <time> nên kèm thuộc tính nào?", &["clock", "date", "moment", "datetime"], 3),
    q("ht4_17", "Thuộc tính hidden làm gì?", &["Ẩn phần tử khỏi hiển thị", "Mã hóa nội dung", "Khóa chỉnh sửa", "Ẩn khỏi mã nguồn"], 0),
    q("ht4_18", "Poster của <video> là gì?", &["Phụ đề", "Ảnh hiển thị trước khi phát", "Âm lượng mặc định", "Tên video"], 1),
    q("ht4_19", "Vì sao dùng thẻ ngữ nghĩa thay vì <div> cho tất cả?", &["Tải nhanh hơn", "Bắt buộc bởi trình duyệt", "Máy đọc và công cụ tìm kiếm hiểu cấu trúc", "Ít ký tự hơn"], 2),
    q("ht4_20", "<picture> dùng để làm gì?", &["Vẽ canvas", "Tạo album", "Chú thích ảnh", "Chọn nguồn ảnh theo điều kiện hiển thị"], 3),
  ]
}

// Level 5: meta, truy cập được (a11y), thực hành tốt.
fn html_level_5() -> Vec<PracticeQuestion> {
  vec![
    q("ht5_01", "Khai báo bộ ký tự của trang viết thế nào?", &["<meta charset='utf-8'>", "<charset utf-8>", "<meta lang='utf-8'>", "<encoding utf-8>"], 0),
    q("ht5_02", "Thẻ meta viewport dùng để làm gì?", &["Chặn sao chép", "Hiển thị đúng trên thiết bị di động", "Tăng tốc tải trang", "Đặt màu nền"], 1),
    q("ht5_03", "Favicon khai báo bằng thẻ nào?", &["<meta rel='icon'>", "<icon src=...>", "<link rel='icon' href=...>", "<img rel='icon'>"], 2),
    q("ht5_04", "Mỗi trang nên có bao nhiêu thẻ <h1>?", &["Không giới hạn", "Ít nhất 3", "Không cần h1", "Một"], 3),
    q("ht5_05", "Thuộc tính alt của ảnh quan trọng vì sao?", &["Trình đọc màn hình đọc được nội dung ảnh", "Tăng độ phân giải", "Bắt buộc để ảnh hiện", "Đổi tên tệp ảnh"], 0),
    q("ht5_06", "Vai trò ARIA khai báo qua thuộc tính nào?", &["aria", "role", "a11y", "label"], 1),
    q("ht5_07", "Thuộc tính nào gắn nhãn đọc được cho phần tử không có văn bản?", &["alt-text", "title-label", "aria-label", "describe"], 2),
    q("ht5_08", "Thứ tự tiêu đề hợp lý là gì?", &["h1 ở cuối trang", "Chỉ dùng h1", "h3 trước h2", "h1 rồi h2 rồi h3, không nhảy cóc"], 3),
    q("ht5_09", "Liên kết nên có văn bản thế nào?", &["Mô tả đích đến", "'Bấm vào đây'", "Địa chỉ URL thô", "Càng ngắn càng tốt, một ký tự"], 0),
    q("ht5_10", "Thuộc tính tabindex='0' làm gì?", &["Bỏ phần tử khỏi tab", "Cho phần tử nhận focus theo thứ tự tự nhiên", "Đặt phần tử lên đầu", "Khóa bàn phím"], 1),
    q("ht5_11", "robots trong <meta name='robots'> điều khiển gì?", &["Tốc độ tải", "Bộ nhớ đệm", "Cách công cụ tìm kiếm lập chỉ mục", "Quyền camera"], 2),
    q("ht5_12", "Thẻ <noscript> hiển thị khi nào?", &["Luôn luôn", "Khi trang lỗi", "Trên di động", "Khi JavaScript bị tắt"], 3),
    q("ht5_13", "Mô tả trang cho kết quả tìm kiếm đặt ở đâu?", &["<meta name='description'>", "<title>", "<h1>", "<header>"], 0),
    q("ht5_14", "Phần tử <button> tốt hơn <div onclick> vì sao?", &["Đẹp hơn", "Hỗ trợ bàn phím và trình đọc màn hình sẵn", "Tải nhanh hơn", "Ít thuộc tính hơn"], 1),
    q("ht5_15", "Kiểm tra HTML hợp lệ bằng công cụ nào?", &["Trình nén ảnh", "Bộ gỡ lỗi CSS", "Trình xác thực (validator) W3C", "Trình quản lý gói"], 2),
    q("ht5_16", "lang='vi' trên thẻ <html> giúp gì?", &["Dịch trang tự động", "Đổi phông chữ", "Chặn người nước ngoài", "Trình đọc màn hình phát âm đúng tiếng Việt"], 3),
    q("ht5_17", "Thuộc tính rel='noopener' trên liên kết _blank để làm gì?", &["Ngăn trang mới điều khiển trang gốc", "Mở nhanh hơn", "Chặn quảng cáo", "Ẩn địa chỉ nguồn"], 0),
    q("ht5_18", "Nội dung quan trọng KHÔNG nên truyền tải chỉ bằng gì?", &["Văn bản", "Màu sắc đơn thuần", "Tiêu đề", "Danh sách"], 1),
    q("ht5_19", "Thẻ <template> chứa gì?", &["Mã CSS", "Siêu dữ liệu", "Nội dung không hiển thị, dùng để nhân bản bằng script", "Phông chữ"], 2),
    q("ht5_20", "Vì sao nên đặt <script> cuối <body> hoặc dùng defer?", &["Bắt buộc về cú pháp", "Giảm dung lượng", "Tránh lỗi bảo mật", "Không chặn việc dựng nội dung trang"], 3),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mission_orders_are_contiguous_and_only_first_unlocked() {
    for (lang, missions) in mission_catalog() {
      assert_eq!(missions.len(), TRACK_LEN, "{lang} track length");
      for (i, m) in missions.iter().enumerate() {
        assert_eq!(m.order as usize, i + 1, "{}: order must be contiguous", m.id);
        assert_eq!(m.unlocked, i == 0, "{}: only order 1 starts unlocked", m.id);
        assert!(!m.completed);
        if m.kind == MissionKind::Quiz {
          let opts = m.options.as_ref().expect("quiz options");
          let correct = m.correct_option.expect("quiz correct option");
          assert!(correct < opts.len(), "{}: correct option in range", m.id);
        }
      }
    }
  }

  #[test]
  fn each_track_total_reaches_the_gold_threshold() {
    for (lang, missions) in mission_catalog() {
      let total: u32 = missions.iter().map(|m| m.xp_reward).sum();
      assert!(total >= 5000, "{lang} total {total} must make gold reachable");
    }
  }

  #[test]
  fn practice_pools_hold_a_full_session_each() {
    let bank = practice_bank();
    for lang in [Language::Python, Language::Html] {
      for level in 1..=5u8 {
        let pool = bank.get(&(lang, level)).expect("pool");
        assert_eq!(pool.len(), 20, "{lang} level {level}");
        for question in pool {
          assert_eq!(question.options.len(), 4, "{}", question.id);
          assert!(question.correct_option < question.options.len(), "{}", question.id);
        }
      }
    }
  }

  #[test]
  fn badge_ids_are_distinct() {
    let ids = [first_step_badge().id, gold_rank_badge().id, silver_rank_badge().id];
    assert_eq!(ids.iter().collect::<std::collections::HashSet<_>>().len(), ids.len());
  }
}
